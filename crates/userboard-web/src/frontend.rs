//! Embedded HTML page shell.
//!
//! The full-page response for `/` is assembled from this shell plus the
//! fragments in [`crate::render`].  All CSS is inline and htmx is the only
//! script dependency, so the server needs no static asset directory.

/// Wrap fragment markup in the full HTML document.
pub fn base_layout(content: &str) -> String {
    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Userboard</title>
<script src="https://unpkg.com/htmx.org@1.9.12"></script>
<style>
*,*::before,*::after{{box-sizing:border-box;margin:0;padding:0}}
:root{{
  --bg:#1a1a2e;
  --bg-panel:#16213e;
  --bg-input:#0f3460;
  --text:#e4e4e4;
  --text-muted:#8a8a9a;
  --accent:#e94560;
  --border:#2a2a4a;
  --success:#4ecca3;
  --error:#ff6b81;
}}
html,body{{min-height:100%;font-family:-apple-system,BlinkMacSystemFont,"Segoe UI",Roboto,Helvetica,Arial,sans-serif;background:var(--bg);color:var(--text)}}
.header{{padding:14px 24px;background:var(--bg-panel);border-bottom:1px solid var(--border)}}
.header h1{{font-size:18px;font-weight:600;letter-spacing:.5px}}
.header h1 span{{color:var(--accent)}}
.container{{max-width:820px;margin:0 auto;padding:20px;display:flex;flex-direction:column;gap:20px}}
.panel{{background:var(--bg-panel);border:1px solid var(--border);border-radius:12px;padding:18px}}
.panel h2{{font-size:15px;margin-bottom:12px;color:var(--text-muted);text-transform:uppercase;letter-spacing:.5px}}
form{{display:flex;flex-direction:column;gap:10px}}
label{{font-size:13px;color:var(--text-muted)}}
input[type=text],input[type=email],select{{
  padding:10px 12px;border-radius:8px;background:var(--bg-input);
  border:1px solid var(--border);color:var(--text);font-size:14px;outline:none}}
input:focus,select:focus{{border-color:var(--accent)}}
.checkbox-row{{display:flex;align-items:center;gap:8px;font-size:14px}}
button{{padding:10px 16px;border-radius:8px;border:none;background:var(--accent);
  color:#fff;font-size:14px;cursor:pointer}}
button:hover{{opacity:.9}}
button.ghost{{background:transparent;border:1px solid var(--border);color:var(--text-muted)}}
table{{width:100%;border-collapse:collapse;font-size:14px}}
th,td{{text-align:left;padding:8px 10px;border-bottom:1px solid var(--border)}}
th{{color:var(--text-muted);font-weight:500;font-size:12px;text-transform:uppercase}}
.badge{{display:inline-block;padding:2px 8px;border-radius:10px;font-size:12px;border:1px solid var(--border)}}
.badge.admin{{color:var(--accent);border-color:var(--accent)}}
.badge.regular{{color:var(--text-muted)}}
.available{{color:var(--success);font-size:13px}}
.taken{{color:var(--error);font-size:13px}}
#error-message{{color:var(--error);font-size:14px}}
.empty{{color:var(--text-muted);font-size:14px;padding:8px 0}}
</style>
</head>
<body>
<div class="header"><h1>User<span>board</span></h1></div>
<div class="container">
{content}
</div>
</body>
</html>"##
    )
}
