fn main() {
    tankmate::run();
}
