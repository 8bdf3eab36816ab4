fn main() {
    println!("cargo:rerun-if-env-changed=TRIGGER_WIFI_SSID");
    println!("cargo:rerun-if-env-changed=TRIGGER_WIFI_PASSWORD");
    println!("cargo:rerun-if-env-changed=TRIGGER_CONFIG_JSON");

    // Host builds (tests, fuzzing) have no ESP-IDF environment to export.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
