/// Detect if a desktop environment is available (simple check for Windows/macOS/Linux)
#[allow(clippy::needless_return)]
pub fn has_desktop_env() -> bool {
    #[cfg(any(target_os = "windows", target_os = "macos"))]
    {
        return true;
    }
    #[cfg(target_os = "linux")]
    {
        // Check DISPLAY or WAYLAND_DISPLAY env variable
        return has_display_var(|key| std::env::var_os(key).is_some_and(|v| !v.is_empty()));
    }
    #[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
    {
        return false;
    }
}

#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
fn has_display_var(is_set: impl Fn(&str) -> bool) -> bool {
    is_set("DISPLAY") || is_set("WAYLAND_DISPLAY")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_vars() {
        assert!(has_display_var(|key| key == "DISPLAY"));
        assert!(has_display_var(|key| key == "WAYLAND_DISPLAY"));
        assert!(!has_display_var(|_| false));
    }
}
