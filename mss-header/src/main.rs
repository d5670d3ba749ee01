//! mss-header: wrap an E51 firmware binary for ENVM boot mode 1.
//!
//! Usage: mss-header <firmware.bin>
//! Writes <firmware>-bm1-p0.bin and <firmware>-bm1-p0.hex beside the input.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use mss_header::{bind, to_ihex, ENVM_BASE};

fn outputs(input: &Path) -> (PathBuf, PathBuf) {
    let stem = input.with_extension("");
    let stem = stem.to_string_lossy();
    (
        PathBuf::from(format!("{}-bm1-p0.bin", stem)),
        PathBuf::from(format!("{}-bm1-p0.hex", stem)),
    )
}

fn run(input: &Path) -> std::io::Result<(PathBuf, PathBuf)> {
    let payload = fs::read(input)?;
    let image = bind(&payload);
    let (bin, hex) = outputs(input);
    fs::write(&bin, &image)?;
    fs::write(&hex, to_ihex(&image, ENVM_BASE))?;
    Ok((bin, hex))
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 2 {
        eprintln!("usage: {} <firmware.bin>", args.first().map(String::as_str).unwrap_or("mss-header"));
        return ExitCode::FAILURE;
    }

    match run(Path::new(&args[1])) {
        Ok((bin, hex)) => {
            println!("wrote {}", bin.display());
            println!("wrote {}", hex.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}: {}", args[1], e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_names() {
        let (bin, hex) = outputs(Path::new("build/release/e51.bin"));
        assert_eq!(bin, PathBuf::from("build/release/e51-bm1-p0.bin"));
        assert_eq!(hex, PathBuf::from("build/release/e51-bm1-p0.hex"));
    }

    #[test]
    fn test_run_writes_both_files() {
        let dir = std::env::temp_dir().join(format!("mss-header-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let input = dir.join("fw.bin");
        fs::write(&input, [0x13u8, 0, 0, 0]).unwrap();

        let (bin, hex) = run(&input).unwrap();
        assert_eq!(fs::read(&bin).unwrap(), bind(&[0x13, 0, 0, 0]));
        assert!(fs::read_to_string(&hex).unwrap().ends_with(":00000001FF\n"));

        fs::remove_dir_all(&dir).unwrap();
    }
}
