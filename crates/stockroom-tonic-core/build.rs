/// Builds the gRPC client and server code for the `stockroom.proto`
/// definition using `tonic-build`.
///
/// The generated modules land in the crate's `OUT_DIR` and are pulled in via
/// `tonic::include_proto!("stockroom.v1")`. A file descriptor set is also
/// emitted so the server can expose gRPC reflection.
///
/// # Panics
///
/// Panics if code generation fails; a broken proto definition should stop
/// the build.
use std::env;
use std::path::PathBuf;

fn main() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let descriptor_path = out_dir.join("stockroom_descriptor.bin");

    tonic_build::configure()
        .file_descriptor_set_path(&descriptor_path)
        .compile_protos(&["proto/stockroom.proto"], &["proto"])
        .unwrap();
}
