//! Control page served at `/`

/// Static HTML form submitting an override to `/set`
pub const INDEX_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>PatroMonitor</title>
<style>
body{font-family:sans-serif;background:#141414;color:#eee;margin:2em}
label{display:block;margin:1em 0 .3em}
input[type=number]{width:6em;font-size:1.2em}
button{margin-top:1.5em;font-size:1.2em;padding:.4em 1.2em}
</style>
</head>
<body>
<h1>PatroMonitor</h1>
<p>Pin the preview color. The display stays on this color until it restarts.</p>
<form action="/set" method="get">
<label for="red">Red</label>
<input type="number" id="red" name="red" min="0" max="255" value="0" required>
<label for="green">Green</label>
<input type="number" id="green" name="green" min="0" max="255" value="0" required>
<label for="blue">Blue</label>
<input type="number" id="blue" name="blue" min="0" max="255" value="0" required>
<br>
<button type="submit">Set color</button>
</form>
</body>
</html>
"#;
