use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use minifb::{Key, Window, WindowOptions};

use famicore::{CartridgeNes, Console, FrameBuffer, DISPLAY_HEIGHT, DISPLAY_WIDTH};

#[derive(Parser)]
#[command(name = "famicore-desktop", about = "Desktop frontend for the famicore emulator core")]
struct Args {
    /// Path to an iNES rom image
    #[arg(short, long)]
    rom: PathBuf,

    /// Integer window scale factor
    #[arg(short, long, default_value = "2")]
    scale: usize,
}

fn main() {
    let args = Args::parse();

    let cartridge = match CartridgeNes::from_ines_file(&args.rom) {
        Ok(cartridge) => cartridge,
        Err(err) => {
            eprintln!("failed to load {}: {}", args.rom.display(), err);
            std::process::exit(1);
        }
    };

    println!("loaded: {}", args.rom.display());
    println!("  mapper:    {}", cartridge.mapper_id());
    println!("  mirroring: {:?}", cartridge.mirroring());
    println!("  prg rom:   {} bytes", cartridge.prg_len());
    println!("  chr rom:   {} bytes", cartridge.chr_len());

    let scale = args.scale.min(4).max(1);

    let mut window = Window::new(
        "famicore",
        DISPLAY_WIDTH * scale,
        DISPLAY_HEIGHT * scale,
        WindowOptions {
            resize: false,
            ..WindowOptions::default()
        },
    )
    .expect("failed to open a window");

    // roughly one NTSC frame
    window.limit_update_rate(Some(Duration::from_micros(16600)));

    let mut console = Console::new(cartridge);
    let mut screen = FrameBuffer::new();
    console.power_on();

    let mut buffer = vec![0u32; DISPLAY_WIDTH * DISPLAY_HEIGHT];

    while window.is_open() && !window.is_key_down(Key::Escape) {
        console.run_frame(&mut screen);

        for (i, pixel) in buffer.iter_mut().enumerate() {
            let colour = screen.pixel(i % DISPLAY_WIDTH, i / DISPLAY_WIDTH);
            *pixel = (0xFF << 24)
                | ((colour.0 as u32) << 16)
                | ((colour.1 as u32) << 8)
                | colour.2 as u32;
        }

        window
            .update_with_buffer(&buffer, DISPLAY_WIDTH, DISPLAY_HEIGHT)
            .expect("failed to present the frame");
    }
}
