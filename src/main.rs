fn main() -> std::io::Result<()> {
    tactix::uci::uci_top::run_stdio_loop()
}
