fn main() {
    codegraph_landing::start();
}
