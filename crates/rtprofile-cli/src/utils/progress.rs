use indicatif::{ProgressBar, ProgressStyle};
use rtprofile::core::io::profile::output_file_name;
use rtprofile::engine::progress::{Progress, ProgressCallback};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::warn;

const SPINNER_TICK_MS: u64 = 80;

/// Drives an `indicatif` spinner from engine progress events. The frame count is unknown
/// up front, so frames are counted rather than shown as a bar.
#[derive(Clone)]
pub struct CliProgressHandler {
    pb: Arc<Mutex<ProgressBar>>,
}

impl CliProgressHandler {
    pub fn new() -> Self {
        let pb = ProgressBar::new_spinner()
            .with_style(Self::spinner_style())
            .with_message("Initializing...");
        pb.set_draw_target(indicatif::ProgressDrawTarget::stderr());
        pb.disable_steady_tick();
        pb.finish_and_clear();

        Self {
            pb: Arc::new(Mutex::new(pb)),
        }
    }

    pub fn get_callback(&self) -> ProgressCallback<'static> {
        let pb_clone = self.pb.clone();

        Box::new(move |progress: Progress| {
            let Ok(mut pb_guard) = pb_clone.lock() else {
                warn!("Progress bar mutex was poisoned. Cannot update progress.");
                return;
            };

            match progress {
                Progress::PhaseStart { name } => {
                    pb_guard.reset();
                    pb_guard.set_position(0);
                    pb_guard.set_style(Self::spinner_style());
                    pb_guard.enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
                    pb_guard.set_message(name.to_string());
                }
                Progress::PhaseFinish => {
                    pb_guard.disable_steady_tick();
                    pb_guard.finish_with_message("✓ Done");
                }
                Progress::FrameFinish {
                    index,
                    bins_written,
                    empty_bins,
                } => {
                    pb_guard.set_style(Self::frame_style());
                    pb_guard.inc(1);
                    let mut msg = format!("{} ({} bins", output_file_name(index), bins_written);
                    if empty_bins > 0 {
                        msg.push_str(&format!(", {} empty", empty_bins));
                    }
                    msg.push(')');
                    pb_guard.set_message(msg);
                }
                Progress::Message(msg) => {
                    if !pb_guard.is_finished() {
                        pb_guard.println(format!("  {}", msg));
                    } else {
                        pb_guard.set_message(msg);
                    }
                }
            }
        })
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .expect("Failed to create spinner style template")
    }

    fn frame_style() -> ProgressStyle {
        ProgressStyle::with_template("{spinner:.green} [{pos} frames, {elapsed}] {msg}")
            .expect("Failed to create frame style template")
    }
}

impl Default for CliProgressHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn handler_initializes_in_a_clean_state() {
        let handler = CliProgressHandler::new();
        let pb = handler.pb.lock().unwrap();
        assert_eq!(pb.position(), 0);
        assert!(pb.is_finished());
    }

    #[test]
    fn callback_counts_frames() {
        let handler = CliProgressHandler::new();
        let callback = handler.get_callback();

        callback(Progress::PhaseStart {
            name: "Extracting interface profiles",
        });
        {
            let pb = handler.pb.lock().unwrap();
            assert_eq!(pb.message(), "Extracting interface profiles");
            assert!(!pb.is_finished());
        }

        callback(Progress::FrameFinish {
            index: 0,
            bins_written: 31,
            empty_bins: 0,
        });
        callback(Progress::FrameFinish {
            index: 1,
            bins_written: 29,
            empty_bins: 2,
        });
        {
            let pb = handler.pb.lock().unwrap();
            assert_eq!(pb.position(), 2);
            assert_eq!(pb.message(), "interface_001.dat (29 bins, 2 empty)");
        }

        callback(Progress::PhaseFinish);
        {
            let pb = handler.pb.lock().unwrap();
            assert!(pb.is_finished());
            assert_eq!(pb.message(), "✓ Done");
        }
    }

    #[test]
    fn new_phase_resets_frame_count() {
        let handler = CliProgressHandler::new();
        let callback = handler.get_callback();

        callback(Progress::PhaseStart { name: "First" });
        callback(Progress::FrameFinish {
            index: 0,
            bins_written: 1,
            empty_bins: 0,
        });
        callback(Progress::PhaseFinish);
        callback(Progress::PhaseStart { name: "Second" });

        let pb = handler.pb.lock().unwrap();
        assert_eq!(pb.position(), 0);
        assert_eq!(pb.message(), "Second");
    }

    #[test]
    fn callback_is_thread_safe() {
        let handler = CliProgressHandler::new();
        let callback = handler.get_callback();

        thread::spawn(move || {
            callback(Progress::PhaseStart {
                name: "Thread Test",
            });
            callback(Progress::Message("halfway".to_string()));
            callback(Progress::PhaseFinish);
        })
        .join()
        .unwrap();

        let pb = handler.pb.lock().unwrap();
        assert!(pb.is_finished());
        assert_eq!(pb.message(), "✓ Done");
    }
}
