fn main() {
    if let Err(e) = notch_clipboard_lib::run() {
        tracing::error!("notch-clipboard exited: {}", e);
        std::process::exit(1);
    }
}
