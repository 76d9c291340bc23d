use std::io;

use crewsyn_rpc::SynergyServer;

fn main() -> io::Result<()> {
    let mode = std::env::var("CREWSYND_TRANSPORT").unwrap_or_else(|_| "stdio".to_string());
    let server = SynergyServer::new();
    match mode.as_str() {
        "stdio" => server.serve_stdio(),
        "http" => {
            let addr =
                std::env::var("CREWSYN_HTTP_ADDR").unwrap_or_else(|_| "127.0.0.1:8790".to_string());
            server.serve_http(&addr)
        }
        _ => Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "CREWSYND_TRANSPORT must be stdio or http",
        )),
    }
}
