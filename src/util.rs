// Small helpers shared by the components.

/// `mm:ss`; minutes keep growing past an hour.
pub fn format_time(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

pub fn clog(msg: &str) {
    gloo::console::log!(msg);
}

pub fn cerror(msg: &str) {
    gloo::console::error!(msg);
}
