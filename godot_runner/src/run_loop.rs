use gdh_libgodot::{Godot_Instance, Result};
use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Run_Stats {
    pub iterations: u64,
    pub elapsed: Duration,
    /// False if we stopped because of `max_iterations`.
    pub quit_requested: bool,
}

/// Starts the instance, iterates it until the engine quits (or `max_iterations`
/// is reached), then shuts it down and destroys it.
/// The instance is destroyed on every path, including errors.
pub fn run_to_completion(mut instance: Godot_Instance, max_iterations: Option<u64>) -> Result<Run_Stats> {
    instance.start()?;
    lok!("Godot instance started.");

    let start_t = Instant::now();
    let mut iterations = 0;
    let mut quit_requested = false;
    loop {
        if let Some(max) = max_iterations {
            if iterations >= max {
                linfo!("Reached {} iterations: stopping the engine.", max);
                break;
            }
        }

        iterations += 1;
        if instance.iteration() {
            quit_requested = true;
            break;
        }
    }
    let elapsed = start_t.elapsed();

    instance.shutdown();
    instance.destroy();

    Ok(Run_Stats {
        iterations,
        elapsed,
        quit_requested,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use gdh_libgodot::{Engine_Args, Libgodot_Error};
    use gdh_test::{Fake_Engine_Config, Fake_Session};

    #[test]
    fn iterates_until_quit() {
        let session = Fake_Session::new(Fake_Engine_Config {
            quit_after: 3,
            ..Default::default()
        });
        let lib = session.lib();
        let instance = lib.create_godot_instance(&Engine_Args::new("runner")).unwrap();

        let stats = run_to_completion(instance, None).unwrap();
        assert_eq!(stats.iterations, 3);
        assert!(stats.quit_requested);

        let report = session.last_report().unwrap();
        assert_eq!(report.iterations, 3);
        assert_eq!(report.shutdown_calls, 1);
        assert!(report.destroyed);
    }

    #[test]
    fn stops_at_max_iterations() {
        let session = Fake_Session::new(Fake_Engine_Config {
            quit_after: 1000,
            ..Default::default()
        });
        let lib = session.lib();
        let instance = lib.create_godot_instance(&Engine_Args::new("runner")).unwrap();

        let stats = run_to_completion(instance, Some(10)).unwrap();
        assert_eq!(stats.iterations, 10);
        assert!(!stats.quit_requested);
        assert_eq!(session.live_instances(), 0);
    }

    #[test]
    fn failed_start_still_destroys() {
        let session = Fake_Session::new(Fake_Engine_Config {
            start_result: false,
            ..Default::default()
        });
        let lib = session.lib();
        let instance = lib.create_godot_instance(&Engine_Args::new("runner")).unwrap();

        assert!(matches!(
            run_to_completion(instance, None),
            Err(Libgodot_Error::Start_Failed)
        ));
        assert_eq!(session.live_instances(), 0);
        assert_eq!(session.last_report().unwrap().iterations, 0);
    }
}
