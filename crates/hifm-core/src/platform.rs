use std::path::PathBuf;

pub fn data_dir() -> PathBuf {
    // On macOS and Linux, use ~/.local/share/hifm/ (XDG standard)
    #[cfg(unix)]
    {
        dirs::home_dir()
            .unwrap_or_else(temp_dir)
            .join(".local")
            .join("share")
            .join("hifm")
    }
    #[cfg(windows)]
    {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("hifm")
    }
}

pub fn config_dir() -> PathBuf {
    // On macOS and Linux, always use ~/.config/hifm/
    #[cfg(unix)]
    {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("hifm")
    }

    #[cfg(windows)]
    {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("hifm")
    }
}

pub fn temp_dir() -> PathBuf {
    std::env::temp_dir()
}

/// Speech programs we know how to drive, in order of preference.
#[cfg(target_os = "macos")]
fn speech_binary_names() -> &'static [&'static str] {
    &["say", "espeak-ng", "espeak"]
}

#[cfg(all(unix, not(target_os = "macos")))]
fn speech_binary_names() -> &'static [&'static str] {
    &["espeak-ng", "espeak", "spd-say"]
}

#[cfg(windows)]
fn speech_binary_names() -> &'static [&'static str] {
    &["espeak-ng.exe", "espeak.exe"]
}

/// Find a text-to-speech program.
///
/// Searches in order:
/// 1. HIFM_SPEECH_PATH environment variable
/// 2. PATH
pub fn find_speech_binary() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("HIFM_SPEECH_PATH") {
        let p = PathBuf::from(path);
        if p.exists() {
            return Some(p);
        }
    }
    find_on_path(speech_binary_names())
}

fn find_on_path(names: &[&str]) -> Option<PathBuf> {
    let path = std::env::var_os("PATH")?;
    for dir in std::env::split_paths(&path) {
        for name in names {
            let p = dir.join(name);
            if p.is_file() {
                return Some(p);
            }
        }
    }
    None
}
