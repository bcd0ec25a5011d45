fn main() {
    // Host builds (tests, fuzzing) carry no ESP-IDF toolchain.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
