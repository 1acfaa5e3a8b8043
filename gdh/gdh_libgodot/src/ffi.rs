// Subset of gdextension_interface.h needed to host the engine.
// Everything here must match the C layout exactly.

use std::os::raw::{c_char, c_int, c_void};

pub type GDExtensionBool = u8;
pub type GDExtensionInt = i64;

pub const GDEXTENSION_TRUE: GDExtensionBool = 1;
pub const GDEXTENSION_FALSE: GDExtensionBool = 0;

// Note: these are all opaque pointers owned by the engine
pub type GDExtensionObjectPtr = *mut c_void;
pub type GDExtensionClassLibraryPtr = *mut c_void;
pub type GDExtensionMethodBindPtr = *const c_void;
pub type GDExtensionConstStringNamePtr = *const c_void;
pub type GDExtensionUninitializedStringNamePtr = *mut c_void;
pub type GDExtensionConstTypePtr = *const c_void;
pub type GDExtensionTypePtr = *mut c_void;

pub type GDExtensionInitializationLevel = c_int;

pub const GDEXTENSION_INITIALIZATION_CORE: GDExtensionInitializationLevel = 0;
pub const GDEXTENSION_INITIALIZATION_SERVERS: GDExtensionInitializationLevel = 1;
pub const GDEXTENSION_INITIALIZATION_SCENE: GDExtensionInitializationLevel = 2;
pub const GDEXTENSION_INITIALIZATION_EDITOR: GDExtensionInitializationLevel = 3;

pub type GDExtensionInterfaceFunctionPtr = Option<unsafe extern "C" fn()>;

pub type GDExtensionInterfaceGetProcAddress =
    Option<unsafe extern "C" fn(p_function_name: *const c_char) -> GDExtensionInterfaceFunctionPtr>;

pub type GDExtensionInitializeCallback =
    Option<unsafe extern "C" fn(p_userdata: *mut c_void, p_level: GDExtensionInitializationLevel)>;

#[repr(C)]
pub struct GDExtensionInitialization {
    pub minimum_initialization_level: GDExtensionInitializationLevel,
    pub userdata: *mut c_void,
    pub initialize: GDExtensionInitializeCallback,
    pub deinitialize: GDExtensionInitializeCallback,
}

pub type GDExtensionInitializationFunction = Option<
    unsafe extern "C" fn(
        p_get_proc_address: GDExtensionInterfaceGetProcAddress,
        p_library: GDExtensionClassLibraryPtr,
        r_initialization: *mut GDExtensionInitialization,
    ) -> GDExtensionBool,
>;

/// Storage for an engine StringName. Its only member is a pointer to the
/// engine-side data, so we can hold it by value.
#[repr(C)]
pub struct String_Name {
    _opaque: [*mut c_void; 1],
}

impl String_Name {
    pub const fn uninit() -> Self {
        String_Name {
            _opaque: [std::ptr::null_mut()],
        }
    }

    pub fn as_uninit_ptr(&mut self) -> GDExtensionUninitializedStringNamePtr {
        self as *mut Self as GDExtensionUninitializedStringNamePtr
    }

    pub fn as_ptr(&self) -> GDExtensionConstStringNamePtr {
        self as *const Self as GDExtensionConstStringNamePtr
    }
}

// Exported by libgodot
pub type Libgodot_Create_Godot_Instance_Fn = unsafe extern "C" fn(
    p_argc: c_int,
    p_argv: *mut *mut c_char,
    p_init_func: GDExtensionInitializationFunction,
    p_platform_data: *mut c_void,
) -> GDExtensionObjectPtr;

pub type Libgodot_Destroy_Godot_Instance_Fn = unsafe extern "C" fn(p_godot_instance: GDExtensionObjectPtr);

// Fetched through get_proc_address
pub type Classdb_Get_Method_Bind_Fn = unsafe extern "C" fn(
    p_classname: GDExtensionConstStringNamePtr,
    p_methodname: GDExtensionConstStringNamePtr,
    p_hash: GDExtensionInt,
) -> GDExtensionMethodBindPtr;

pub type Object_Method_Bind_Ptrcall_Fn = unsafe extern "C" fn(
    p_method_bind: GDExtensionMethodBindPtr,
    p_instance: GDExtensionObjectPtr,
    p_args: *const GDExtensionConstTypePtr,
    r_ret: GDExtensionTypePtr,
);

pub type String_Name_New_With_Latin1_Chars_Fn = unsafe extern "C" fn(
    r_dest: GDExtensionUninitializedStringNamePtr,
    p_contents: *const c_char,
    p_is_static: GDExtensionBool,
);
