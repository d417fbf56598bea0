#![forbid(unsafe_code)]

/// `embed_migrations!` is a proc-macro and cannot track the migration
/// directory on its own, so changes to the SQL files would otherwise not
/// trigger a rebuild of the embedded migration list.
fn main() {
    println!("cargo:rerun-if-changed=./migrations");
}
