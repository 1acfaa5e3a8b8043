// An in-process stand-in for libgodot, exposing the same C entry points.
// It lets tests exercise the whole create/start/iteration/destroy path
// without the real engine.

use gdh_libgodot::ffi::*;
use gdh_libgodot::instance::{BOOL_NO_ARGS_HASH, VOID_NO_ARGS_HASH};
use gdh_libgodot::{Lib_Godot, Libgodot_Api};
use std::ffi::CStr;
use std::os::raw::{c_char, c_int, c_void};
use std::sync::{Mutex, MutexGuard};

#[derive(Clone, Debug)]
pub struct Fake_Engine_Config {
    /// `iteration()` reports "quit" on this call (1-based).
    pub quit_after: u32,
    pub fail_create: bool,
    pub start_result: bool,
    pub expose_is_started: bool,
    pub expose_shutdown: bool,
    pub start_hash: GDExtensionInt,
}

impl Default for Fake_Engine_Config {
    fn default() -> Self {
        Fake_Engine_Config {
            quit_after: 1,
            fail_create: false,
            start_result: true,
            expose_is_started: true,
            expose_shutdown: true,
            start_hash: BOOL_NO_ARGS_HASH,
        }
    }
}

/// What the fake engine saw during the lifetime of one instance.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Fake_Report {
    pub args: Vec<String>,
    pub init_level: Option<GDExtensionInitializationLevel>,
    pub start_calls: u32,
    pub iterations: u32,
    pub shutdown_calls: u32,
    pub destroyed: bool,
}

struct Fake_Object {
    report: Fake_Report,
    started: bool,
}

struct Fake_State {
    config: Option<Fake_Engine_Config>,
    live: usize,
    last_report: Option<Fake_Report>,
}

static STATE: Mutex<Fake_State> = Mutex::new(Fake_State {
    config: None,
    live: 0,
    last_report: None,
});

// The engine state is process-wide, so only one session may run at a time.
static SESSION_LOCK: Mutex<()> = Mutex::new(());

fn state() -> MutexGuard<'static, Fake_State> {
    STATE.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn config() -> Fake_Engine_Config {
    state().config.clone().unwrap_or_default()
}

/// Holds the fake engine for the duration of a test.
pub struct Fake_Session {
    _guard: MutexGuard<'static, ()>,
}

impl Fake_Session {
    pub fn new(config: Fake_Engine_Config) -> Self {
        let guard = SESSION_LOCK
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        {
            let mut state = state();
            state.config = Some(config);
            state.live = 0;
            state.last_report = None;
        }
        Fake_Session { _guard: guard }
    }

    pub fn lib(&self) -> Lib_Godot {
        // Safety: the fake entry points are plain functions that live as long as the process.
        unsafe {
            Lib_Godot::from_api(Libgodot_Api {
                create: fake_create_godot_instance,
                destroy: fake_destroy_godot_instance,
            })
        }
    }

    /// Number of instances created and not yet destroyed.
    pub fn live_instances(&self) -> usize {
        state().live
    }

    /// Report of the last destroyed instance.
    pub fn last_report(&self) -> Option<Fake_Report> {
        state().last_report.clone()
    }
}

static START_BIND: u8 = 0;
static IS_STARTED_BIND: u8 = 0;
static ITERATION_BIND: u8 = 0;
static SHUTDOWN_BIND: u8 = 0;

fn bind_ptr(marker: &'static u8) -> GDExtensionMethodBindPtr {
    marker as *const u8 as GDExtensionMethodBindPtr
}

unsafe extern "C" fn fake_create_godot_instance(
    argc: c_int,
    argv: *mut *mut c_char,
    init_func: GDExtensionInitializationFunction,
    _platform_data: *mut c_void,
) -> GDExtensionObjectPtr {
    let config = config();

    let args = (0..argc as usize)
        .map(|i| CStr::from_ptr(*argv.add(i)).to_string_lossy().into_owned())
        .collect::<Vec<_>>();
    assert!((*argv.add(argc as usize)).is_null(), "argv must be null-terminated");

    let mut init = GDExtensionInitialization {
        minimum_initialization_level: GDEXTENSION_INITIALIZATION_CORE,
        userdata: std::ptr::null_mut(),
        initialize: None,
        deinitialize: None,
    };
    let init_func = match init_func {
        Some(f) => f,
        None => return std::ptr::null_mut(),
    };
    if init_func(Some(fake_get_proc_address), std::ptr::null_mut(), &mut init) == GDEXTENSION_FALSE {
        return std::ptr::null_mut();
    }
    if let Some(initialize) = init.initialize {
        initialize(init.userdata, GDEXTENSION_INITIALIZATION_SCENE);
    }

    if config.fail_create {
        return std::ptr::null_mut();
    }

    state().live += 1;
    let object = Box::new(Fake_Object {
        report: Fake_Report {
            args,
            init_level: Some(init.minimum_initialization_level),
            ..Default::default()
        },
        started: false,
    });
    Box::into_raw(object) as GDExtensionObjectPtr
}

unsafe extern "C" fn fake_destroy_godot_instance(instance: GDExtensionObjectPtr) {
    assert!(!instance.is_null());
    let mut object = Box::from_raw(instance as *mut Fake_Object);
    object.report.destroyed = true;

    let mut state = state();
    state.live -= 1;
    state.last_report = Some(object.report);
}

unsafe extern "C" fn fake_get_proc_address(name: *const c_char) -> GDExtensionInterfaceFunctionPtr {
    let f: *const () = match CStr::from_ptr(name).to_bytes() {
        b"classdb_get_method_bind" => fake_classdb_get_method_bind as *const (),
        b"object_method_bind_ptrcall" => fake_object_method_bind_ptrcall as *const (),
        b"string_name_new_with_latin1_chars" => fake_string_name_new_with_latin1_chars as *const (),
        _ => return None,
    };
    Some(std::mem::transmute::<*const (), unsafe extern "C" fn()>(f))
}

// Our StringNames just remember the pointer to their static contents.
unsafe extern "C" fn fake_string_name_new_with_latin1_chars(
    r_dest: GDExtensionUninitializedStringNamePtr,
    p_contents: *const c_char,
    p_is_static: GDExtensionBool,
) {
    assert_eq!(p_is_static, GDEXTENSION_TRUE);
    *(r_dest as *mut *const c_char) = p_contents;
}

unsafe fn read_string_name(name: GDExtensionConstStringNamePtr) -> String {
    let contents = *(name as *const *const c_char);
    CStr::from_ptr(contents).to_string_lossy().into_owned()
}

unsafe extern "C" fn fake_classdb_get_method_bind(
    p_classname: GDExtensionConstStringNamePtr,
    p_methodname: GDExtensionConstStringNamePtr,
    p_hash: GDExtensionInt,
) -> GDExtensionMethodBindPtr {
    let config = config();
    if read_string_name(p_classname) != "GodotInstance" {
        return std::ptr::null();
    }
    match (read_string_name(p_methodname).as_str(), p_hash) {
        ("start", h) if h == config.start_hash => bind_ptr(&START_BIND),
        ("iteration", BOOL_NO_ARGS_HASH) => bind_ptr(&ITERATION_BIND),
        ("is_started", BOOL_NO_ARGS_HASH) if config.expose_is_started => bind_ptr(&IS_STARTED_BIND),
        ("shutdown", VOID_NO_ARGS_HASH) if config.expose_shutdown => bind_ptr(&SHUTDOWN_BIND),
        _ => std::ptr::null(),
    }
}

unsafe extern "C" fn fake_object_method_bind_ptrcall(
    p_method_bind: GDExtensionMethodBindPtr,
    p_instance: GDExtensionObjectPtr,
    _p_args: *const GDExtensionConstTypePtr,
    r_ret: GDExtensionTypePtr,
) {
    let config = config();
    let object = &mut *(p_instance as *mut Fake_Object);
    let write_bool = |val: bool| {
        *(r_ret as *mut GDExtensionBool) = if val { GDEXTENSION_TRUE } else { GDEXTENSION_FALSE };
    };

    if p_method_bind == bind_ptr(&START_BIND) {
        object.report.start_calls += 1;
        object.started = config.start_result;
        write_bool(config.start_result);
    } else if p_method_bind == bind_ptr(&IS_STARTED_BIND) {
        write_bool(object.started);
    } else if p_method_bind == bind_ptr(&ITERATION_BIND) {
        assert!(object.started, "iteration before start");
        object.report.iterations += 1;
        write_bool(object.report.iterations >= config.quit_after);
    } else if p_method_bind == bind_ptr(&SHUTDOWN_BIND) {
        object.report.shutdown_calls += 1;
        object.started = false;
    } else {
        panic!("unknown method bind {:?}", p_method_bind);
    }
}
