use crate::args::Engine_Args;
use crate::error::{Libgodot_Error, Result};
use crate::extension;
use crate::ffi::*;
use crate::instance::{Godot_Instance, Method_Hashes};
use libloading as ll;
use std::os::raw::c_void;
use std::path::Path;

#[cfg(target_os = "macos")]
const LIBGODOT_LIBRARY_NAME: &str = "libgodot.dylib";
#[cfg(all(unix, not(target_os = "macos")))]
const LIBGODOT_LIBRARY_NAME: &str = "./libgodot.so";
#[cfg(windows)]
const LIBGODOT_LIBRARY_NAME: &str = "libgodot.dll";

const CREATE_SYMBOL: &str = "libgodot_create_godot_instance";
const DESTROY_SYMBOL: &str = "libgodot_destroy_godot_instance";

/// The symbols libgodot exports.
#[derive(Clone, Copy)]
pub struct Libgodot_Api {
    pub create: Libgodot_Create_Godot_Instance_Fn,
    pub destroy: Libgodot_Destroy_Godot_Instance_Fn,
}

impl Libgodot_Api {
    /// # Safety
    /// The returned pointers are only valid while `lib` stays loaded.
    unsafe fn load(lib: &ll::Library) -> Result<Self> {
        Ok(Libgodot_Api {
            create: *get_symbol::<Libgodot_Create_Godot_Instance_Fn>(lib, CREATE_SYMBOL)?,
            destroy: *get_symbol::<Libgodot_Destroy_Godot_Instance_Fn>(lib, DESTROY_SYMBOL)?,
        })
    }
}

unsafe fn get_symbol<'lib, T>(
    lib: &'lib ll::Library,
    symbol: &'static str,
) -> Result<ll::Symbol<'lib, T>> {
    lib.get::<T>(symbol.as_bytes())
        .map_err(|source| Libgodot_Error::Missing_Symbol { symbol, source })
}

/// A loaded libgodot. Instances created from it borrow it, so the library
/// cannot be unloaded while one of them is alive.
pub struct Lib_Godot {
    api: Libgodot_Api,
    // Passed to the engine on Windows, null elsewhere.
    native_handle: *mut c_void,
    _lib: Option<ll::Library>,
}

impl Lib_Godot {
    pub fn default_path() -> &'static Path {
        Path::new(LIBGODOT_LIBRARY_NAME)
    }

    pub fn open_default() -> Result<Self> {
        Self::open(Self::default_path())
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let lib = unsafe { ll::Library::new(path) }.map_err(|source| Libgodot_Error::Lib_Open {
            path: path.to_path_buf(),
            source,
        })?;

        // If this fails `lib` is dropped, which unloads it.
        let api = unsafe { Libgodot_Api::load(&lib)? };
        let (lib, native_handle) = split_native_handle(lib);

        lok!("Loaded libgodot from {:?}.", path);

        Ok(Lib_Godot {
            api,
            native_handle,
            _lib: Some(lib),
        })
    }

    /// Wraps an already resolved API, e.g. one linked into this very process.
    /// # Safety
    /// Both function pointers must stay valid for the lifetime of the returned value
    /// and behave like the libgodot exports.
    pub unsafe fn from_api(api: Libgodot_Api) -> Self {
        Lib_Godot {
            api,
            native_handle: std::ptr::null_mut(),
            _lib: None,
        }
    }

    pub fn create_godot_instance(&self, args: &Engine_Args) -> Result<Godot_Instance<'_>> {
        self.create_godot_instance_with_hashes(args, Method_Hashes::default())
    }

    pub fn create_godot_instance_with_hashes(
        &self,
        args: &Engine_Args,
        hashes: Method_Hashes,
    ) -> Result<Godot_Instance<'_>> {
        let mut c_args = args.to_c_args()?;

        ldebug!("Creating Godot instance with args {:?}", args.as_slice());

        extension::reset();
        let object = unsafe {
            (self.api.create)(
                c_args.argc(),
                c_args.argv(),
                Some(extension::gdextension_default_init),
                self.native_handle,
            )
        };
        if object.is_null() {
            return Err(Libgodot_Error::Create_Failed);
        }

        match Godot_Instance::bind(self, object, &hashes) {
            Ok(instance) => {
                lok!("Created Godot instance.");
                Ok(instance)
            }
            Err(err) => {
                // Don't leak an instance we cannot drive.
                unsafe { (self.api.destroy)(object) };
                Err(err)
            }
        }
    }

    pub fn destroy_godot_instance(&self, instance: Godot_Instance<'_>) {
        debug_assert!(std::ptr::eq(instance.lib(), self));
        instance.destroy();
    }

    /// # Safety
    /// `object` must come from this library's create function and not be destroyed yet.
    pub(crate) unsafe fn destroy_raw(&self, object: GDExtensionObjectPtr) {
        (self.api.destroy)(object);
    }
}

#[cfg(windows)]
fn split_native_handle(lib: ll::Library) -> (ll::Library, *mut c_void) {
    let lib: ll::os::windows::Library = lib.into();
    let raw = lib.into_raw();
    // Safety: `raw` was just released from a valid library.
    let lib = unsafe { ll::os::windows::Library::from_raw(raw) };
    (lib.into(), raw as *mut c_void)
}

#[cfg(not(windows))]
fn split_native_handle(lib: ll::Library) -> (ll::Library, *mut c_void) {
    (lib, std::ptr::null_mut())
}
