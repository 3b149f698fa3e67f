fn main() {
    // The library and its tests build without the webview toolchain.
    #[cfg(feature = "desktop")]
    tauri_build::build();
}
