//! Prints which Adam7 pass every pixel of an image belongs to, followed by the size of each
//! pass. With `--progressive` it also shows the image after each pass has been merged.
use clap::Parser;

use adam7::{pass_sizes, Deinterlacer, PixelMatrix, PASS_COUNT};

#[derive(Parser)]
#[command(about, version)]
struct Config {
    /// image width in pixels
    width: u32,
    /// image height in pixels
    height: u32,
    /// print the partially merged image after every pass
    #[arg(short, long)]
    progressive: bool,
}

fn print_matrix(m: &PixelMatrix<char>) {
    for row in m.rows() {
        println!("    {}", row.iter().collect::<String>());
    }
}

fn main() -> Result<(), adam7::InterlaceError> {
    let c = Config::parse();
    let sizes = pass_sizes(c.width, c.height);

    let mut image = Deinterlacer::new(c.width, c.height, '.')?;
    for (pass, &(w, h)) in (0..PASS_COUNT).zip(sizes.iter()) {
        let digit = char::from(b'0' + pass);
        image.merge_pass(pass, &PixelMatrix::new(w, h, digit)?)?;
        if c.progressive {
            println!("after pass {}:", pass);
            print_matrix(image.matrix());
        }
    }
    if !c.progressive {
        print_matrix(image.matrix());
    }

    for (pass, &(w, h)) in sizes.iter().enumerate() {
        println!("pass {}: {}x{} ({} pixels)", pass, w, h, u64::from(w) * u64::from(h));
    }
    Ok(())
}
