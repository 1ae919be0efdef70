fn main() {
    attendance_frontend::run();
}
