//! Platform-specific argument construction for the ping binary.

use crate::model::RunConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Platform {
    Windows,
    Mac,
    Unix,
}

impl Platform {
    pub(crate) fn current() -> Self {
        if cfg!(windows) {
            Platform::Windows
        } else if cfg!(target_os = "macos") {
            Platform::Mac
        } else {
            Platform::Unix
        }
    }
}

/// Build the argument list for the host platform's ping dialect.
pub fn build_ping_args(cfg: &RunConfig) -> Vec<String> {
    build_args_for(Platform::current(), cfg)
}

fn build_args_for(platform: Platform, cfg: &RunConfig) -> Vec<String> {
    let mut args = Vec::new();

    match platform {
        Platform::Windows => {
            match cfg.count {
                Some(count) => {
                    args.push("-n".to_string());
                    args.push(count.to_string());
                }
                // Windows ping stops after four packets unless told otherwise.
                None => args.push("-t".to_string()),
            }
            args.push("-w".to_string());
            args.push(cfg.timeout.as_millis().to_string());
            if let Some(size) = cfg.size {
                args.push("-l".to_string());
                args.push(size.to_string());
            }
        }
        Platform::Mac | Platform::Unix => {
            if let Some(count) = cfg.count {
                args.push("-c".to_string());
                args.push(count.to_string());
            }
            args.push("-i".to_string());
            args.push(cfg.interval.as_secs_f64().to_string());
            args.push("-W".to_string());
            // macOS takes -W in milliseconds, everything else in seconds.
            if platform == Platform::Mac {
                args.push(cfg.timeout.as_millis().to_string());
            } else {
                args.push(cfg.timeout.as_secs().to_string());
            }
            if let Some(size) = cfg.size {
                args.push("-s".to_string());
                args.push(size.to_string());
            }
        }
    }

    args.push(cfg.host.clone());
    args
}
