// cargo run -p uniffi_cli -- generate --library target/debug/libsuivi.so --language kotlin --out-dir bindings
fn main() {
    uniffi::uniffi_bindgen_main()
}
