// The host registers no classes of its own: the init function only exists
// so the engine hands us `get_proc_address`, which is the only way to call
// methods on the instance it returns.

use crate::error::{Libgodot_Error, Result};
use crate::ffi::*;
use std::ffi::CStr;
use std::os::raw::c_void;
use std::sync::Mutex;

lazy_static! {
    static ref GET_PROC_ADDRESS: Mutex<GDExtensionInterfaceGetProcAddress> = Mutex::new(None);
}

fn store_get_proc_address(get_proc_address: GDExtensionInterfaceGetProcAddress) {
    match GET_PROC_ADDRESS.lock() {
        Ok(mut stored) => *stored = get_proc_address,
        Err(poisoned) => *poisoned.into_inner() = get_proc_address,
    }
}

fn stored_get_proc_address() -> GDExtensionInterfaceGetProcAddress {
    match GET_PROC_ADDRESS.lock() {
        Ok(stored) => *stored,
        Err(poisoned) => *poisoned.into_inner(),
    }
}

/// Forgets the `get_proc_address` recorded by a previous instance.
pub(crate) fn reset() {
    store_get_proc_address(None);
}

unsafe extern "C" fn initialize_default_module(
    _userdata: *mut c_void,
    level: GDExtensionInitializationLevel,
) {
    if level != GDEXTENSION_INITIALIZATION_SCENE {
        return;
    }
    lverbose!("Default extension module initialized.");
}

unsafe extern "C" fn uninitialize_default_module(
    _userdata: *mut c_void,
    level: GDExtensionInitializationLevel,
) {
    if level != GDEXTENSION_INITIALIZATION_SCENE {
        return;
    }
    lverbose!("Default extension module uninitialized.");
}

/// Init function passed to `libgodot_create_godot_instance`.
/// # Safety
/// Only meant to be called by the engine, with a valid `r_initialization`.
pub unsafe extern "C" fn gdextension_default_init(
    p_get_proc_address: GDExtensionInterfaceGetProcAddress,
    _p_library: GDExtensionClassLibraryPtr,
    r_initialization: *mut GDExtensionInitialization,
) -> GDExtensionBool {
    if p_get_proc_address.is_none() || r_initialization.is_null() {
        return GDEXTENSION_FALSE;
    }

    store_get_proc_address(p_get_proc_address);

    let init = &mut *r_initialization;
    init.minimum_initialization_level = GDEXTENSION_INITIALIZATION_SCENE;
    init.userdata = std::ptr::null_mut();
    init.initialize = Some(initialize_default_module);
    init.deinitialize = Some(uninitialize_default_module);

    GDEXTENSION_TRUE
}

/// The handful of engine interface functions the host calls.
#[derive(Clone, Copy)]
pub struct Extension_Interface {
    classdb_get_method_bind: Classdb_Get_Method_Bind_Fn,
    object_method_bind_ptrcall: Object_Method_Bind_Ptrcall_Fn,
    string_name_new_with_latin1_chars: String_Name_New_With_Latin1_Chars_Fn,
}

macro_rules! load_interface_fn {
    ($get_proc_address: expr, $name: literal, $fn_ty: ty) => {{
        let name = CStr::from_bytes_with_nul(concat!($name, "\0").as_bytes())
            .map_err(|_| Libgodot_Error::Missing_Interface_Function($name))?;
        match ($get_proc_address)(name.as_ptr()) {
            Some(f) => std::mem::transmute::<unsafe extern "C" fn(), $fn_ty>(f),
            None => return Err(Libgodot_Error::Missing_Interface_Function($name)),
        }
    }};
}

impl Extension_Interface {
    /// Resolves the interface through the `get_proc_address` the engine
    /// handed to `gdextension_default_init`.
    pub fn load() -> Result<Self> {
        let get_proc_address =
            stored_get_proc_address().ok_or(Libgodot_Error::Interface_Unavailable)?;

        // Safety: get_proc_address returns pointers to functions with the
        // signatures declared in gdextension_interface.h.
        unsafe {
            Ok(Extension_Interface {
                classdb_get_method_bind: load_interface_fn!(
                    get_proc_address,
                    "classdb_get_method_bind",
                    Classdb_Get_Method_Bind_Fn
                ),
                object_method_bind_ptrcall: load_interface_fn!(
                    get_proc_address,
                    "object_method_bind_ptrcall",
                    Object_Method_Bind_Ptrcall_Fn
                ),
                string_name_new_with_latin1_chars: load_interface_fn!(
                    get_proc_address,
                    "string_name_new_with_latin1_chars",
                    String_Name_New_With_Latin1_Chars_Fn
                ),
            })
        }
    }

    fn static_string_name(&self, name: &'static CStr) -> String_Name {
        let mut string_name = String_Name::uninit();
        // Safety: `name` is 'static, so the engine can keep referencing it.
        unsafe {
            (self.string_name_new_with_latin1_chars)(
                string_name.as_uninit_ptr(),
                name.as_ptr(),
                GDEXTENSION_TRUE,
            );
        }
        string_name
    }

    pub fn method_bind(&self, method: &Method_Desc) -> Result<GDExtensionMethodBindPtr> {
        let class_name = self.static_string_name(method.class);
        let method_name = self.static_string_name(method.name);

        let bind = unsafe {
            (self.classdb_get_method_bind)(class_name.as_ptr(), method_name.as_ptr(), method.hash)
        };
        if bind.is_null() {
            return Err(Libgodot_Error::Missing_Method {
                class: method.class_str(),
                method: method.name_str(),
                hash: method.hash,
            });
        }
        Ok(bind)
    }

    /// Calls a no-argument method returning a bool.
    /// # Safety
    /// `bind` must belong to a method of that shape and `object` must be alive.
    pub unsafe fn call_bool(
        &self,
        bind: GDExtensionMethodBindPtr,
        object: GDExtensionObjectPtr,
    ) -> bool {
        let mut ret: GDExtensionBool = GDEXTENSION_FALSE;
        (self.object_method_bind_ptrcall)(
            bind,
            object,
            std::ptr::null(),
            &mut ret as *mut GDExtensionBool as GDExtensionTypePtr,
        );
        ret != GDEXTENSION_FALSE
    }

    /// Calls a no-argument method returning nothing.
    /// # Safety
    /// `bind` must belong to a method of that shape and `object` must be alive.
    pub unsafe fn call_void(&self, bind: GDExtensionMethodBindPtr, object: GDExtensionObjectPtr) {
        (self.object_method_bind_ptrcall)(bind, object, std::ptr::null(), std::ptr::null_mut());
    }
}

/// Identifies an engine method by class, name and the hash of its signature
/// (as listed in extension_api.json).
#[derive(Clone, Copy, Debug)]
pub struct Method_Desc {
    pub class: &'static CStr,
    pub name: &'static CStr,
    pub hash: GDExtensionInt,
}

impl Method_Desc {
    fn class_str(&self) -> &'static str {
        self.class.to_str().unwrap_or("<class>")
    }

    fn name_str(&self) -> &'static str {
        self.name.to_str().unwrap_or("<method>")
    }
}
