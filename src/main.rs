use std::{env, fs, io};

use static_huffman::{decode, encode};

enum Mode {
    Encode,
    Decode,
}

fn parse_args() -> Result<(Mode, String, String), Box<dyn std::error::Error>> {
    let mut args = env::args().skip(1);
    let (Some(mode), Some(input), Some(output)) = (args.next(), args.next(), args.next()) else {
        return Err(Box::new(io::Error::new(
            io::ErrorKind::InvalidInput,
            "usage: static-huffman <encode|decode> <input> <output>",
        )));
    };
    let mode = match mode.as_str() {
        "encode" => Mode::Encode,
        "decode" => Mode::Decode,
        other => {
            return Err(Box::new(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("unknown mode '{other}', expected encode or decode"),
            )))
        }
    };
    Ok((mode, input, output))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let (mode, input_path, output_path) = parse_args()?;
    let contents = fs::read(&input_path)?;

    let result = match mode {
        Mode::Encode => encode(&contents)?,
        Mode::Decode => decode(&contents)?,
    };
    fs::write(&output_path, &result)?;

    let ratio = if contents.is_empty() {
        0.0
    } else {
        result.len() as f64 / contents.len() as f64
    };
    log::info!(
        "{input_path} ({} bytes) -> {output_path} ({} bytes), ratio {ratio:.3}",
        contents.len(),
        result.len()
    );
    Ok(())
}
