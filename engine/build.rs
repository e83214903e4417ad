fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=proto/table_rows.proto");
    tonic_build::configure()
        .build_server(true)
        .build_client(true) // The GUI talks to the engine through the generated client
        .compile(&["proto/table_rows.proto"], &["proto"])?;
    Ok(())
}
