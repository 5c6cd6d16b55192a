fn main() {
    println!("cargo:rerun-if-changed=resources/quadview.rc");
    println!("cargo:rerun-if-changed=resources/quadview.manifest");

    if std::env::var("CARGO_CFG_TARGET_OS").as_deref() == Ok("windows") {
        embed_resource::compile("resources/quadview.rc", embed_resource::NONE)
            .manifest_optional()
            .ok();
    }
}
