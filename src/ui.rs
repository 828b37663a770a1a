//! The dashboard page. Single-file UI with no build step; the server
//! renders one HTML document and the page's own script does the rest.

/// Render the page. The poll cadence is configuration, so it is baked into
/// the script at render time.
pub fn render_index_html(poll_interval_secs: u64) -> String {
    let poll_ms = poll_interval_secs.saturating_mul(1000);

    format!(
        r#"<!doctype html>
<html lang="en">
  <head>
    <meta charset="utf-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1" />
    <title>SignalDash • Market Signals</title>
    <style>
      :root {{
        --bg: #0b1220;
        --panel: rgba(255,255,255,0.06);
        --stroke: rgba(255,255,255,0.12);
        --text: rgba(255,255,255,0.92);
        --muted: rgba(255,255,255,0.65);
        --good: #33d17a;
        --bad: #ff4d4d;
        --warn: #ffcc00;
        --brand: #7c5cff;
        --brand2: #3dd6d0;
      }}
      * {{ box-sizing: border-box; }}
      body {{
        margin: 0;
        font-family: ui-sans-serif, system-ui, -apple-system, Segoe UI, Roboto, Helvetica, Arial;
        color: var(--text);
        background: radial-gradient(1200px 900px at 15% 10%, rgba(124,92,255,0.20), transparent 60%),
                    radial-gradient(1100px 800px at 90% 20%, rgba(61,214,208,0.16), transparent 55%),
                    var(--bg);
      }}
      .wrap {{ max-width: 1100px; margin: 0 auto; padding: 22px 18px 42px; }}
      .topbar {{
        display: flex; align-items: center; justify-content: space-between; gap: 12px;
        padding: 16px 16px; border: 1px solid var(--stroke); border-radius: 16px;
        background: linear-gradient(180deg, rgba(255,255,255,0.06), rgba(255,255,255,0.03));
        backdrop-filter: blur(10px);
      }}
      .brand {{ display: flex; align-items: center; gap: 12px; }}
      .logo {{
        width: 42px; height: 42px; border-radius: 12px;
        background: conic-gradient(from 180deg, var(--brand), var(--brand2), var(--brand));
        box-shadow: 0 12px 30px rgba(124,92,255,0.25);
      }}
      .title {{ font-weight: 800; letter-spacing: 0.2px; }}
      .subtitle {{ color: var(--muted); font-size: 12px; margin-top: 2px; }}
      .chips {{ display: flex; flex-wrap: wrap; gap: 8px; justify-content: flex-end; }}
      .chip {{
        padding: 7px 10px; border-radius: 999px; border: 1px solid var(--stroke);
        background: rgba(255,255,255,0.04); font-size: 12px; color: var(--muted);
        white-space: nowrap;
      }}
      .chip b {{ color: var(--text); font-weight: 700; }}
      .card {{
        border: 1px solid var(--stroke); border-radius: 16px; background: var(--panel);
        backdrop-filter: blur(10px); margin-top: 14px; overflow: hidden;
      }}
      .card .hd {{
        display: flex; align-items: center; justify-content: space-between; gap: 10px;
        padding: 12px 14px; border-bottom: 1px solid rgba(255,255,255,0.08);
        background: rgba(255,255,255,0.03); font-weight: 800;
      }}
      .card .bd {{ padding: 12px 14px; }}
      .good {{ color: var(--good); }}
      .bad {{ color: var(--bad); }}
      .warn {{ color: var(--warn); }}
      table {{ width: 100%; border-collapse: collapse; }}
      th, td {{ padding: 10px 10px; border-bottom: 1px solid rgba(255,255,255,0.07); }}
      th {{ text-align: left; color: var(--muted); font-size: 12px; font-weight: 700; }}
      td {{ font-size: 13px; }}
      tr.row {{ cursor: pointer; }}
      tr.row:hover {{ background: rgba(255,255,255,0.04); }}
      tr.row.selected {{ background: rgba(124,92,255,0.18); }}
      .mono {{ font-family: ui-monospace, SFMono-Regular, Menlo, Monaco, Consolas, monospace; }}
      .sig {{
        display: inline-block; padding: 3px 10px; border-radius: 999px;
        font-size: 11px; font-weight: 800; letter-spacing: 0.3px;
        border: 1px solid var(--stroke);
      }}
      .sig-strong-buy {{ background: rgba(51,209,122,0.25); color: var(--good); }}
      .sig-buy {{ background: rgba(51,209,122,0.12); color: var(--good); }}
      .sig-neutral {{ background: rgba(255,204,0,0.15); color: var(--warn); }}
      .sig-sell {{ background: rgba(255,140,0,0.18); color: #ff9d4d; }}
      .sig-strong-sell {{ background: rgba(255,77,77,0.22); color: var(--bad); }}
      .sig-unknown {{ background: rgba(255,255,255,0.08); color: var(--muted); }}
      .btn {{
        cursor: pointer; padding: 8px 12px; border-radius: 10px;
        border: 1px solid rgba(255,255,255,0.12); background: rgba(255,255,255,0.05);
        color: var(--text); font-weight: 700; font-size: 12px;
      }}
      .btn:hover {{ background: rgba(255,255,255,0.08); }}
      .btn:disabled {{ opacity: 0.45; cursor: not-allowed; }}
      .btn.danger {{ border-color: rgba(255,77,77,0.45); }}
      input, select {{
        background: rgba(255,255,255,0.05); border: 1px solid var(--stroke);
        border-radius: 10px; padding: 8px 10px; color: var(--text); font-size: 13px;
      }}
      .split {{ display: flex; gap: 10px; flex-wrap: wrap; align-items: center; }}
      .spacer {{ flex: 1; }}
      .small {{ font-size: 12px; color: var(--muted); }}
      .pager {{ display: flex; gap: 10px; align-items: center; justify-content: center; padding: 12px; }}
      .login-card {{
        max-width: 380px; margin: 12vh auto 0; padding: 26px;
        border: 1px solid var(--stroke); border-radius: 16px; background: var(--panel);
        backdrop-filter: blur(10px);
      }}
      .login-card h1 {{ margin: 0 0 6px; font-size: 20px; }}
      .login-card p {{ margin: 0 0 16px; color: var(--muted); font-size: 13px; }}
      .login-card input {{ width: 100%; margin-bottom: 12px; }}
      .login-card .btn {{ width: 100%; }}
      .err {{ color: var(--bad); font-size: 12px; min-height: 16px; margin-top: 8px; }}
      .hidden {{ display: none; }}
    </style>
  </head>
  <body>
    <div id="loginView" class="hidden">
      <div class="login-card">
        <h1>SignalDash</h1>
        <p>Enter the dashboard password to continue.</p>
        <input type="password" id="passwordInput" placeholder="Password" autocomplete="current-password" />
        <button class="btn" id="loginBtn">Unlock</button>
        <div class="err" id="loginErr"></div>
      </div>
    </div>

    <div id="dashView" class="wrap hidden">
      <div class="topbar">
        <div class="brand">
          <div class="logo"></div>
          <div>
            <div class="title">SignalDash • Market Signals</div>
            <div class="subtitle">mean-reversion signal monitor</div>
          </div>
        </div>
        <div class="chips">
          <div class="chip">Status: <b id="statusText">starting…</b></div>
          <div class="chip">Updated: <b id="lastUpdate">--:--:--</b></div>
          <div class="chip">Pairs: <b id="pairCount">--</b></div>
        </div>
      </div>

      <div class="card">
        <div class="hd">Watchlist</div>
        <div class="bd">
          <div class="split">
            <input type="text" id="newSymbol" placeholder="Add symbol (e.g. BTCUSDT)" />
            <button class="btn" id="addBtn">Add</button>
            <button class="btn danger" id="removeBtn" disabled>Remove selected (0)</button>
            <span class="spacer"></span>
            <input type="file" id="uploadInput" accept=".csv,.txt" class="hidden" />
            <button class="btn" id="uploadBtn">Upload list</button>
            <button class="btn" id="exportBtn">Export CSV</button>
          </div>
          <div class="split" style="margin-top: 10px;">
            <label class="small" for="filterSel">Signal</label>
            <select id="filterSel">
              <option value="ALL">All</option>
              <option value="STRONG_BUY">Strong Buy</option>
              <option value="BUY">Buy</option>
              <option value="NEUTRAL">Neutral</option>
              <option value="SELL">Sell</option>
              <option value="STRONG_SELL">Strong Sell</option>
            </select>
            <label class="small" for="sortSel">Sort</label>
            <select id="sortSel">
              <option value="symbol">Symbol A-Z</option>
              <option value="signal">Signal strength</option>
              <option value="score">Score</option>
              <option value="change">24h change</option>
            </select>
            <span class="spacer"></span>
            <span class="small" id="showingText"></span>
          </div>
        </div>
      </div>

      <div class="card">
        <div class="hd">Signals</div>
        <table>
          <thead>
            <tr>
              <th>Symbol</th>
              <th>Signal</th>
              <th>Score</th>
              <th>Price</th>
              <th>24h</th>
              <th>RSI</th>
            </tr>
          </thead>
          <tbody id="rows"></tbody>
        </table>
        <div class="pager">
          <button class="btn" id="prevBtn">← Prev</button>
          <span class="small" id="pageText">Page 1 of 1</span>
          <button class="btn" id="nextBtn">Next →</button>
        </div>
      </div>

      <div class="small" style="margin-top: 12px;">
        Rows refresh every {poll_interval_secs}s. Click a row to select it for removal.
      </div>
    </div>

    <script>
      const POLL_MS = {poll_ms};

      let filter = "ALL";
      let sortBy = "symbol";
      let page = 1;
      let totalPages = 1;
      let selected = new Set();
      let pollTimer = null;

      const el = (id) => document.getElementById(id);

      const fmtNum = (x, d = 2) => {{
        const n = Number(x);
        return Number.isFinite(n) ? n.toFixed(d) : "--";
      }};

      const fmtClock = () => {{
        const d = new Date();
        const p = (n) => String(n).padStart(2, "0");
        return `${{p(d.getHours())}}:${{p(d.getMinutes())}}:${{p(d.getSeconds())}}`;
      }};

      function escapeHtml(s) {{
        return (s || "").replaceAll("&", "&amp;").replaceAll("<", "&lt;").replaceAll(">", "&gt;")
          .replaceAll('"', "&quot;").replaceAll("'", "&#039;");
      }}

      function setStatus(ok, msg) {{
        const node = el("statusText");
        node.textContent = msg;
        node.className = ok ? "good" : "bad";
      }}

      async function getJson(path) {{
        const r = await fetch(path, {{ cache: "no-store" }});
        if (r.status === 401) throw new Error("unauthorized");
        if (!r.ok) throw new Error(`${{path}} -> ${{r.status}}`);
        return await r.json();
      }}

      function showLogin() {{
        stopPolling();
        el("dashView").classList.add("hidden");
        el("loginView").classList.remove("hidden");
        el("passwordInput").focus();
      }}

      function showDashboard() {{
        el("loginView").classList.add("hidden");
        el("dashView").classList.remove("hidden");
        refresh();
        startPolling();
      }}

      function startPolling() {{
        if (pollTimer === null) pollTimer = setInterval(refresh, POLL_MS);
      }}

      function stopPolling() {{
        if (pollTimer !== null) {{
          clearInterval(pollTimer);
          pollTimer = null;
        }}
      }}

      // No timer may outlive the page.
      window.addEventListener("pagehide", stopPolling);

      function signalClass(sig) {{
        const known = ["STRONG_BUY", "BUY", "NEUTRAL", "SELL", "STRONG_SELL"];
        const s = known.includes(sig) ? sig : "UNKNOWN";
        return "sig sig-" + s.toLowerCase().replaceAll("_", "-");
      }}

      function renderRows(entries) {{
        const tb = el("rows");
        tb.innerHTML = "";
        for (const r of entries) {{
          const chg = Number(r.change_24h || 0);
          const chgCls = chg >= 0 ? "good" : "bad";
          const rsi = Number(r.rsi);
          const rsiCls = rsi > 70 ? "bad" : rsi < 30 ? "good" : "";
          const tr = document.createElement("tr");
          tr.className = "row" + (selected.has(r.symbol) ? " selected" : "");
          tr.innerHTML = `
            <td class="mono"><b>${{escapeHtml(r.symbol)}}</b></td>
            <td><span class="${{signalClass(r.signal)}}">${{escapeHtml((r.signal || "--").replaceAll("_", " "))}}</span></td>
            <td>${{fmtNum(r.score, 3)}}</td>
            <td>$${{fmtNum(r.price, 4)}}</td>
            <td class="${{chgCls}}">${{chg >= 0 ? "+" : ""}}${{fmtNum(chg, 2)}}%</td>
            <td class="${{rsiCls}}">${{fmtNum(r.rsi, 1)}}</td>
          `;
          tr.addEventListener("click", () => toggleSelect(r.symbol, tr));
          tb.appendChild(tr);
        }}
      }}

      function toggleSelect(symbol, tr) {{
        if (selected.has(symbol)) {{
          selected.delete(symbol);
          tr.classList.remove("selected");
        }} else {{
          selected.add(symbol);
          tr.classList.add("selected");
        }}
        updateRemoveBtn();
      }}

      function updateRemoveBtn() {{
        const btn = el("removeBtn");
        btn.textContent = `Remove selected (${{selected.size}})`;
        btn.disabled = selected.size === 0;
      }}

      async function refresh() {{
        try {{
          const q = new URLSearchParams({{ filter, sort: sortBy, page: String(page) }});
          const view = await getJson(`/api/view?${{q}}`);
          page = view.page;
          totalPages = Math.max(1, view.total_pages);
          renderRows(view.entries);
          el("pairCount").textContent = String(view.total);
          el("pageText").textContent = `Page ${{view.page}} of ${{totalPages}}`;
          el("prevBtn").disabled = view.page <= 1;
          el("nextBtn").disabled = view.page >= totalPages;
          el("showingText").textContent = `showing ${{view.entries.length}} of ${{view.total}} pairs`;
          el("lastUpdate").textContent = fmtClock();
          setStatus(true, "live");
        }} catch (e) {{
          if (e && e.message === "unauthorized") {{
            showLogin();
            return;
          }}
          // Keep the previous table; only the status chip flips.
          setStatus(false, "Connection Error");
        }}
      }}

      async function login() {{
        el("loginErr").textContent = "";
        try {{
          const r = await fetch("/api/auth", {{
            method: "POST",
            headers: {{ "Content-Type": "application/json" }},
            body: JSON.stringify({{ password: el("passwordInput").value }}),
          }});
          if (r.ok) {{
            el("passwordInput").value = "";
            showDashboard();
          }} else {{
            el("loginErr").textContent = "Invalid password";
          }}
        }} catch (e) {{
          el("loginErr").textContent = "Connection Error";
        }}
      }}

      async function addSymbol() {{
        const raw = el("newSymbol").value.trim();
        if (!raw) return;
        try {{
          const r = await fetch("/api/proxy/pairs/add", {{
            method: "POST",
            headers: {{ "Content-Type": "application/json" }},
            body: JSON.stringify({{ symbol: raw.toUpperCase() }}),
          }});
          if (!r.ok) throw new Error(String(r.status));
          el("newSymbol").value = "";
          await refresh();
        }} catch (e) {{
          alert("Failed to add symbol");
        }}
      }}

      async function removeSelected() {{
        if (selected.size === 0) return;
        try {{
          const r = await fetch("/api/proxy/pairs/remove", {{
            method: "POST",
            headers: {{ "Content-Type": "application/json" }},
            body: JSON.stringify({{ symbols: [...selected] }}),
          }});
          if (!r.ok) throw new Error(String(r.status));
          selected.clear();
          updateRemoveBtn();
          await refresh();
        }} catch (e) {{
          alert("Failed to remove symbols");
        }}
      }}

      async function uploadList(ev) {{
        const file = ev.target.files && ev.target.files[0];
        if (!file) return;
        try {{
          const form = new FormData();
          form.append("file", file);
          const r = await fetch("/api/proxy/pairs/upload", {{ method: "POST", body: form }});
          if (!r.ok) throw new Error(String(r.status));
          await refresh();
        }} catch (e) {{
          alert("Failed to upload file");
        }} finally {{
          ev.target.value = "";
        }}
      }}

      async function exportCsv() {{
        try {{
          const r = await fetch("/api/proxy/pairs/export");
          if (!r.ok) throw new Error(String(r.status));
          const blob = await r.blob();
          const url = URL.createObjectURL(blob);
          const a = document.createElement("a");
          a.href = url;
          a.download = "trading_pairs.csv";
          document.body.appendChild(a);
          a.click();
          URL.revokeObjectURL(url);
          a.remove();
        }} catch (e) {{
          alert("Failed to export symbols");
        }}
      }}

      el("loginBtn").addEventListener("click", login);
      el("passwordInput").addEventListener("keydown", (e) => {{
        if (e.key === "Enter") login();
      }});
      el("newSymbol").addEventListener("keydown", (e) => {{
        if (e.key === "Enter") addSymbol();
      }});
      el("addBtn").addEventListener("click", addSymbol);
      el("removeBtn").addEventListener("click", removeSelected);
      el("uploadBtn").addEventListener("click", () => el("uploadInput").click());
      el("uploadInput").addEventListener("change", uploadList);
      el("exportBtn").addEventListener("click", exportCsv);
      el("filterSel").addEventListener("change", (e) => {{
        filter = e.target.value;
        page = 1;
        refresh();
      }});
      el("sortSel").addEventListener("change", (e) => {{
        sortBy = e.target.value;
        page = 1;
        refresh();
      }});
      el("prevBtn").addEventListener("click", () => {{
        if (page > 1) {{ page -= 1; refresh(); }}
      }});
      el("nextBtn").addEventListener("click", () => {{
        if (page < totalPages) {{ page += 1; refresh(); }}
      }});

      // Probe the session once on load; anything short of a clean "yes"
      // lands on the login form.
      (async () => {{
        try {{
          const r = await fetch("/api/auth/check", {{ cache: "no-store" }});
          if (r.ok) showDashboard();
          else showLogin();
        }} catch (e) {{
          showLogin();
        }}
      }})();
    </script>
  </body>
</html>"#,
        poll_interval_secs = poll_interval_secs,
        poll_ms = poll_ms
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn poll_cadence_is_rendered_into_the_page() {
        let html = render_index_html(15);
        assert!(html.contains("const POLL_MS = 15000;"));
        assert!(html.contains("Rows refresh every 15s"));
    }

    #[test]
    fn page_carries_both_views() {
        let html = render_index_html(15);
        assert!(html.contains("id=\"loginView\""));
        assert!(html.contains("id=\"dashView\""));
        assert!(html.contains("/api/auth/check"));
        assert!(html.contains("/api/proxy/pairs/export"));
    }
}
