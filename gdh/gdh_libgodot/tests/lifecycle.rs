use gdh_libgodot::ffi::GDEXTENSION_INITIALIZATION_SCENE;
use gdh_libgodot::{Engine_Args, Libgodot_Error, Method_Hashes};
use gdh_test::{Fake_Engine_Config, Fake_Session};

fn desktop_args() -> Engine_Args {
    Engine_Args::new("godot_runner")
        .flag("--path", "../../project/")
        .flag("--rendering-method", "gl_compatibility")
        .flag("--rendering-driver", "opengl3")
}

#[test]
fn full_lifecycle_runs_until_engine_quits() {
    let session = Fake_Session::new(Fake_Engine_Config {
        quit_after: 5,
        ..Default::default()
    });
    let lib = session.lib();

    let mut instance = lib.create_godot_instance(&desktop_args()).unwrap();
    assert_eq!(session.live_instances(), 1);
    assert!(!instance.is_started());

    instance.start().unwrap();
    assert!(instance.is_started());

    let mut iterations = 0;
    while !instance.iteration() {
        iterations += 1;
    }
    assert_eq!(iterations, 4);

    instance.shutdown();
    lib.destroy_godot_instance(instance);
    assert_eq!(session.live_instances(), 0);

    let report = session.last_report().unwrap();
    assert_eq!(
        report.args,
        [
            "godot_runner",
            "--path",
            "../../project/",
            "--rendering-method",
            "gl_compatibility",
            "--rendering-driver",
            "opengl3"
        ]
    );
    assert_eq!(report.init_level, Some(GDEXTENSION_INITIALIZATION_SCENE));
    assert_eq!(report.start_calls, 1);
    assert_eq!(report.iterations, 5);
    assert_eq!(report.shutdown_calls, 1);
    assert!(report.destroyed);
}

#[test]
fn null_instance_is_an_error() {
    let session = Fake_Session::new(Fake_Engine_Config {
        fail_create: true,
        ..Default::default()
    });
    let lib = session.lib();

    match lib.create_godot_instance(&desktop_args()) {
        Err(Libgodot_Error::Create_Failed) => (),
        Err(err) => panic!("unexpected error: {}", err),
        Ok(_) => panic!("instance should not have been created"),
    }
    assert_eq!(session.live_instances(), 0);
}

#[test]
fn unknown_method_hash_destroys_the_instance() {
    let session = Fake_Session::new(Fake_Engine_Config::default());
    let lib = session.lib();

    let hashes = Method_Hashes {
        start: 42,
        ..Default::default()
    };
    match lib.create_godot_instance_with_hashes(&desktop_args(), hashes) {
        Err(Libgodot_Error::Missing_Method { method, hash, .. }) => {
            assert_eq!(method, "start");
            assert_eq!(hash, 42);
        }
        Err(err) => panic!("unexpected error: {}", err),
        Ok(_) => panic!("start should not have been found"),
    }
    assert_eq!(session.live_instances(), 0);
    assert!(session.last_report().unwrap().destroyed);
}

#[test]
fn start_failure_and_double_start_are_reported() {
    let session = Fake_Session::new(Fake_Engine_Config {
        start_result: false,
        ..Default::default()
    });
    let lib = session.lib();

    let mut instance = lib.create_godot_instance(&desktop_args()).unwrap();
    assert!(matches!(instance.start(), Err(Libgodot_Error::Start_Failed)));
    assert!(!instance.is_started());
    drop(instance);

    let session = {
        drop(lib);
        drop(session);
        Fake_Session::new(Fake_Engine_Config::default())
    };
    let lib = session.lib();
    let mut instance = lib.create_godot_instance(&desktop_args()).unwrap();
    instance.start().unwrap();
    assert!(matches!(instance.start(), Err(Libgodot_Error::Already_Started)));
    drop(instance);
    assert_eq!(session.last_report().unwrap().start_calls, 1);
}

#[test]
fn iteration_before_start_does_not_reach_the_engine() {
    let session = Fake_Session::new(Fake_Engine_Config::default());
    let lib = session.lib();

    let mut instance = lib.create_godot_instance(&desktop_args()).unwrap();
    assert!(instance.iteration());
    drop(instance);

    assert_eq!(session.last_report().unwrap().iterations, 0);
}

#[test]
fn optional_methods_fall_back_to_host_state() {
    let session = Fake_Session::new(Fake_Engine_Config {
        expose_is_started: false,
        expose_shutdown: false,
        ..Default::default()
    });
    let lib = session.lib();

    let mut instance = lib.create_godot_instance(&desktop_args()).unwrap();
    assert!(!instance.is_started());
    instance.start().unwrap();
    assert!(instance.is_started());
    instance.shutdown();
    assert!(!instance.is_started());
    drop(instance);

    let report = session.last_report().unwrap();
    assert_eq!(report.shutdown_calls, 0);
    assert!(report.destroyed);
}

#[test]
fn dropping_an_instance_destroys_it_once() {
    let session = Fake_Session::new(Fake_Engine_Config::default());
    let lib = session.lib();

    {
        let _instance = lib.create_godot_instance(&desktop_args()).unwrap();
        assert_eq!(session.live_instances(), 1);
    }
    assert_eq!(session.live_instances(), 0);
}

#[test]
fn destroying_a_running_instance_shuts_it_down_first() {
    let session = Fake_Session::new(Fake_Engine_Config::default());
    let lib = session.lib();

    let mut instance = lib.create_godot_instance(&desktop_args()).unwrap();
    instance.start().unwrap();
    lib.destroy_godot_instance(instance);

    let report = session.last_report().unwrap();
    assert_eq!(report.shutdown_calls, 1);
    assert!(report.destroyed);
}

#[test]
fn explicit_shutdown_is_not_repeated_on_destroy() {
    let session = Fake_Session::new(Fake_Engine_Config::default());
    let lib = session.lib();

    let mut instance = lib.create_godot_instance(&desktop_args()).unwrap();
    instance.start().unwrap();
    instance.shutdown();
    instance.destroy();

    assert_eq!(session.last_report().unwrap().shutdown_calls, 1);
}
