use std::io::Write;
use std::process::{Command, Stdio};

/// Copy `text` to the system clipboard via xclip, falling back to wl-copy.
/// Returns whether either tool accepted the text.
pub fn copy_to_clipboard(text: &str) -> bool {
    let candidates: [(&str, &[&str]); 2] = [("xclip", &["-selection", "clipboard"]), ("wl-copy", &[])];
    for (program, args) in candidates {
        let Ok(mut child) = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .spawn()
        else {
            continue;
        };
        if let Some(mut stdin) = child.stdin.take() {
            let _ = stdin.write_all(text.as_bytes());
        }
        let _ = child.wait();
        return true;
    }
    tracing::warn!("no clipboard tool available");
    false
}

/// Open `url` in the desktop's default handler.
pub fn open_in_browser(url: &str) -> bool {
    let opener = if cfg!(target_os = "macos") { "open" } else { "xdg-open" };
    match Command::new(opener)
        .arg(url)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
    {
        Ok(_) => true,
        Err(e) => {
            tracing::warn!(url, error = %e, "could not launch {}", opener);
            false
        }
    }
}
