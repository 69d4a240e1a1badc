/// Native clipboard write. Returns false where no native path exists, in
/// which case the caller hands the text to egui instead.
pub fn write_clipboard_string(s: &str) -> bool {
    #[cfg(windows)]
    {
        clipboard_win::set_clipboard_string(s).is_ok()
    }
    #[cfg(not(windows))]
    {
        let _ = s;
        false
    }
}
