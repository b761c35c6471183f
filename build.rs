fn main() {
    // ── libvips linking ──────────────────────────────────────────────────────
    //
    // The libvips-rs bindings crate ships no build script of its own.
    // We must tell cargo where to find the library for each platform.
    //
    // Linux: install the distribution's libvips development package
    // (e.g. `apt install libvips-dev`).
    // macOS: `brew install vips`.
    // Windows: extract vips-dev-w64-web-*.zip from
    //   https://github.com/libvips/build-win64-mxe/releases
    // and point VIPS_DIR at the extracted directory.
    link_libvips();
}

fn link_libvips() {
    // Re-run whenever the override env-var changes.
    println!("cargo:rerun-if-env-changed=VIPS_DIR");

    let vips_dir = std::env::var("VIPS_DIR").ok();
    let lib_dir = vips_dir
        .as_deref()
        .map(|dir| std::path::Path::new(dir).join("lib"));

    if cfg!(target_os = "windows") {
        match lib_dir {
            Some(lib_dir) if lib_dir.exists() => {
                // Absolute link-args reach both the lib test harness and the
                // binary linker.
                let link_arg = |name: &str| {
                    println!("cargo:rustc-link-arg={}", lib_dir.join(name).display());
                };
                link_arg("libvips.lib");
                // GLib symbols (g_free, g_object_unref, …) called directly by
                // libvips_rs's image.rs must also be explicitly linked.
                link_arg("libglib-2.0.lib");
                link_arg("libgobject-2.0.lib");
            }
            _ => {
                println!("cargo:warning=libvips not found; set VIPS_DIR to a vips-dev-w64 directory.");
            }
        }
    } else {
        if let Some(lib_dir) = lib_dir.filter(|dir| dir.exists()) {
            println!("cargo:rustc-link-search=native={}", lib_dir.display());
        }
        // Linux and macOS: the system (or Homebrew) libvips is sufficient.
        println!("cargo:rustc-link-lib=dylib=vips");
        println!("cargo:rustc-link-lib=dylib=glib-2.0");
        println!("cargo:rustc-link-lib=dylib=gobject-2.0");
    }
}
