//! Headless runner.
//!
//! Loads a flash ROM image (and optionally an EEPROM image), executes a
//! fixed number of instructions and prints the register state. Useful
//! for smoke-testing ROM dumps without a frontend.

use std::fs;
use std::process;

use emu_walker::Walker;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let mut steps: u64 = 1_000_000;
    let mut rom_path = None;
    let mut eeprom_path = None;

    let mut iter = args[1..].iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-n" | "--steps" => {
                let Some(value) = iter.next().and_then(|v| v.parse().ok()) else {
                    eprintln!("--steps needs a number");
                    process::exit(1);
                };
                steps = value;
            }
            "-e" | "--eeprom" => {
                eeprom_path = iter.next().cloned();
            }
            _ => rom_path = Some(arg.clone()),
        }
    }

    let Some(rom_path) = rom_path else {
        eprintln!("Usage: emu-walker [-n steps] [-e eeprom.bin] <rom.bin>");
        process::exit(1);
    };

    let mut walker = Walker::new();

    match fs::read(&rom_path) {
        Ok(image) => {
            if let Err(e) = walker.load_rom(&image) {
                eprintln!("{rom_path}: {e}");
                process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("{rom_path}: {e}");
            process::exit(1);
        }
    }

    if let Some(path) = eeprom_path {
        match fs::read(&path) {
            Ok(image) => {
                if let Err(e) = walker.load_eeprom(&image) {
                    eprintln!("{path}: {e}");
                    process::exit(1);
                }
            }
            Err(e) => {
                eprintln!("{path}: {e}");
                process::exit(1);
            }
        }
    }

    walker.reset();
    for _ in 0..steps {
        walker.step();
    }

    let regs = walker.registers();
    println!("PC  = {:06X}", regs.pc);
    println!("CCR = {:02X}", regs.ccr.0);
    for n in 0u8..8 {
        println!("ER{n} = {:08X}", regs.read32(n));
    }
}
