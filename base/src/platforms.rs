
//! Per-platform surface plumbing.
//!
//! Vulkan is platform agnostic, so presenting to a window goes through a
//! platform specific WSI extension. This module resolves the extension name to
//! request at instance creation and the matching `vk::SurfaceKHR` constructor.

use ash::vk;

use std::ffi::CStr;

#[cfg(target_os = "windows")]
use ash::extensions::khr::Win32Surface;
#[cfg(all(unix, not(target_os = "android"), not(target_os = "macos")))]
use ash::extensions::khr::XlibSurface;
#[cfg(target_os = "macos")]
use ash::extensions::mvk::MacOSSurface;

/// The name of the surface extension for the compilation target.
#[cfg(all(unix, not(target_os = "android"), not(target_os = "macos")))]
pub fn platform_surface_names() -> &'static CStr {
    XlibSurface::name()
}

#[cfg(target_os = "macos")]
pub fn platform_surface_names() -> &'static CStr {
    MacOSSurface::name()
}

#[cfg(target_os = "windows")]
pub fn platform_surface_names() -> &'static CStr {
    Win32Surface::name()
}

/// Create a `vk::SurfaceKHR` for the given window.
///
/// The caller owns the returned handle and must destroy it through the khr::Surface loader.
#[cfg(all(unix, not(target_os = "android"), not(target_os = "macos")))]
pub unsafe fn generate_surface(entry: &ash::Entry, instance: &ash::Instance, window: &winit::Window) -> Result<vk::SurfaceKHR, vk::Result> {

    use winit::os::unix::WindowExt;
    use std::ptr;

    let x11_display = window.get_xlib_display()
        .ok_or(vk::Result::ERROR_INITIALIZATION_FAILED)?;
    let x11_window = window.get_xlib_window()
        .ok_or(vk::Result::ERROR_INITIALIZATION_FAILED)?;

    let surface_ci = vk::XlibSurfaceCreateInfoKHR {
        s_type : vk::StructureType::XLIB_SURFACE_CREATE_INFO_KHR,
        p_next : ptr::null(),
        flags  : Default::default(),
        window : x11_window as vk::Window,
        dpy    : x11_display as *mut vk::Display,
    };

    let loader = XlibSurface::new(entry, instance);
    loader.create_xlib_surface(&surface_ci, None)
}

#[cfg(target_os = "macos")]
pub unsafe fn generate_surface(entry: &ash::Entry, instance: &ash::Instance, window: &winit::Window) -> Result<vk::SurfaceKHR, vk::Result> {

    use winit::os::macos::WindowExt;

    use cocoa::appkit::{NSView, NSWindow};
    use cocoa::base::id as cocoa_id;
    use metal::CoreAnimationLayer;
    use objc::runtime::YES;

    use std::mem;
    use std::os::raw::c_void;
    use std::ptr;

    // a CAMetalLayer must back the view before MoltenVK can present into it.
    let wnd: cocoa_id = mem::transmute(window.get_nswindow());

    let layer = CoreAnimationLayer::new();
    layer.set_edge_antialiasing_mask(0);
    layer.set_presents_with_transaction(false);
    layer.remove_all_animations();

    let view = wnd.contentView();
    layer.set_contents_scale(view.backingScaleFactor());
    view.setLayer(mem::transmute(layer.as_ref()));
    view.setWantsLayer(YES);

    let surface_ci = vk::MacOSSurfaceCreateInfoMVK {
        s_type : vk::StructureType::MACOS_SURFACE_CREATE_INFO_M,
        p_next : ptr::null(),
        flags  : Default::default(),
        p_view : window.get_nsview() as *const c_void,
    };

    let loader = MacOSSurface::new(entry, instance);
    loader.create_mac_os_surface_mvk(&surface_ci, None)
}

#[cfg(target_os = "windows")]
pub unsafe fn generate_surface(entry: &ash::Entry, instance: &ash::Instance, window: &winit::Window) -> Result<vk::SurfaceKHR, vk::Result> {

    use winapi::shared::windef::HWND;
    use winapi::um::libloaderapi::GetModuleHandleW;
    use winit::os::windows::WindowExt;

    use std::os::raw::c_void;
    use std::ptr;

    let hwnd = window.get_hwnd() as HWND;
    let hinstance = GetModuleHandleW(ptr::null()) as *const c_void;

    let surface_ci = vk::Win32SurfaceCreateInfoKHR {
        s_type    : vk::StructureType::WIN32_SURFACE_CREATE_INFO_KHR,
        p_next    : ptr::null(),
        flags     : Default::default(),
        hinstance,
        hwnd      : hwnd as *const c_void,
    };

    let loader = Win32Surface::new(entry, instance);
    loader.create_win32_surface(&surface_ci, None)
}
