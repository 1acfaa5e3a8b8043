use crate::error::{Libgodot_Error, Result};
use crate::extension::{Extension_Interface, Method_Desc};
use crate::ffi::*;
use crate::libgodot::Lib_Godot;
use std::ffi::CStr;

macro_rules! cstr {
    ($s: literal) => {
        unsafe { CStr::from_bytes_with_nul_unchecked(concat!($s, "\0").as_bytes()) }
    };
}

const GODOT_INSTANCE_CLASS: &CStr = cstr!("GodotInstance");

// Hashes of `bool ()` and `void ()` in extension_api.json.
pub const BOOL_NO_ARGS_HASH: GDExtensionInt = 2240911060;
pub const VOID_NO_ARGS_HASH: GDExtensionInt = 3218959716;

/// Signature hashes used to look up the GodotInstance methods. They only
/// change when the engine changes a method's signature.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Method_Hashes {
    pub start: GDExtensionInt,
    pub is_started: GDExtensionInt,
    pub iteration: GDExtensionInt,
    pub shutdown: GDExtensionInt,
}

impl Default for Method_Hashes {
    fn default() -> Self {
        Method_Hashes {
            start: BOOL_NO_ARGS_HASH,
            is_started: BOOL_NO_ARGS_HASH,
            iteration: BOOL_NO_ARGS_HASH,
            shutdown: VOID_NO_ARGS_HASH,
        }
    }
}

struct Instance_Methods {
    start: GDExtensionMethodBindPtr,
    iteration: GDExtensionMethodBindPtr,
    // Not every engine build exposes these.
    is_started: Option<GDExtensionMethodBindPtr>,
    shutdown: Option<GDExtensionMethodBindPtr>,
}

impl Instance_Methods {
    fn bind(interface: &Extension_Interface, hashes: &Method_Hashes) -> Result<Self> {
        let desc = |name, hash| Method_Desc {
            class: GODOT_INSTANCE_CLASS,
            name,
            hash,
        };
        let optional = |name: &'static CStr, hash| match interface.method_bind(&desc(name, hash)) {
            Ok(bind) => Some(bind),
            Err(err) => {
                ldebug!("{}", err);
                None
            }
        };

        Ok(Instance_Methods {
            start: interface.method_bind(&desc(cstr!("start"), hashes.start))?,
            iteration: interface.method_bind(&desc(cstr!("iteration"), hashes.iteration))?,
            is_started: optional(cstr!("is_started"), hashes.is_started),
            shutdown: optional(cstr!("shutdown"), hashes.shutdown),
        })
    }
}

/// Handle to a live engine instance. Dropping it destroys the instance.
pub struct Godot_Instance<'lib> {
    lib: &'lib Lib_Godot,
    object: GDExtensionObjectPtr,
    interface: Extension_Interface,
    methods: Instance_Methods,
    started: bool,
    shut_down: bool,
}

impl<'lib> Godot_Instance<'lib> {
    pub(crate) fn bind(
        lib: &'lib Lib_Godot,
        object: GDExtensionObjectPtr,
        hashes: &Method_Hashes,
    ) -> Result<Self> {
        debug_assert!(!object.is_null());

        let interface = Extension_Interface::load()?;
        let methods = Instance_Methods::bind(&interface, hashes)?;
        Ok(Godot_Instance {
            lib,
            object,
            interface,
            methods,
            started: false,
            shut_down: false,
        })
    }

    pub fn lib(&self) -> &'lib Lib_Godot {
        self.lib
    }

    pub fn as_object_ptr(&self) -> GDExtensionObjectPtr {
        self.object
    }

    pub fn start(&mut self) -> Result<()> {
        if self.started {
            return Err(Libgodot_Error::Already_Started);
        }
        let ok = unsafe { self.interface.call_bool(self.methods.start, self.object) };
        if !ok {
            return Err(Libgodot_Error::Start_Failed);
        }
        self.started = true;
        Ok(())
    }

    pub fn is_started(&self) -> bool {
        match self.methods.is_started {
            Some(bind) => unsafe { self.interface.call_bool(bind, self.object) },
            None => self.started && !self.shut_down,
        }
    }

    /// Runs one engine iteration. Returns true once the engine wants to quit.
    /// An instance that isn't running always wants to quit.
    pub fn iteration(&mut self) -> bool {
        if !self.started || self.shut_down {
            lerr!("iteration() called on a Godot instance that is not running.");
            return true;
        }
        unsafe { self.interface.call_bool(self.methods.iteration, self.object) }
    }

    /// Stops the engine main loop, if the engine exposes a way to do it.
    /// Destroying the instance afterwards is still required.
    pub fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        match self.methods.shutdown {
            Some(bind) => unsafe { self.interface.call_void(bind, self.object) },
            None => ldebug!("GodotInstance has no shutdown method: leaving it to destroy."),
        }
        self.shut_down = true;
    }

    pub fn destroy(self) {
        // Drop does the work.
    }
}

impl Drop for Godot_Instance<'_> {
    fn drop(&mut self) {
        if self.object.is_null() {
            return;
        }
        // A running engine must stop its main loop before being destroyed.
        if self.started && !self.shut_down {
            self.shutdown();
        }
        // Safety: the object came from `self.lib` and is destroyed only here.
        unsafe { self.lib.destroy_raw(self.object) };
        self.object = std::ptr::null_mut();
        lok!("Destroyed Godot instance.");
    }
}
