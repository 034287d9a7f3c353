fn main() {
    // Board builds pick up the ESP-IDF toolchain environment; host builds
    // (tests, simulation) have nothing to generate.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
