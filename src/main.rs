use cpu6502::Machine;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const DEFAULT_BUDGET: i32 = 22;

const ORIGIN: u16 = 0x8000;
const SUBROUTINE: u16 = 0x8010;

// JSR $8010, LDX #$01
const MAIN: [u8; 5] = [0x20, 0x10, 0x80, 0xA2, 0x01];
// LDA #$20, ADC #$22, AND #$7F, ASL A, RTS
const ROUTINE: [u8; 8] = [0xA9, 0x20, 0x69, 0x22, 0x29, 0x7F, 0x0A, 0x60];

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let budget = match std::env::args().nth(1).map(|arg| arg.parse::<i32>()) {
        Some(Ok(budget)) => budget,
        Some(Err(err)) => {
            error!("invalid cycle budget: {err}");
            std::process::exit(2);
        }
        None => DEFAULT_BUDGET,
    };

    info!("Starting 6502 core...");

    let mut machine = Machine::new();
    let loaded = machine
        .load_program(ORIGIN, &MAIN)
        .and_then(|()| machine.memory.load(SUBROUTINE, &ROUTINE));
    if let Err(err) = loaded {
        error!("failed to load program: {err}");
        std::process::exit(1);
    }
    machine.reset();

    match machine.run(budget) {
        Ok(spent) => {
            let cpu = &machine.cpu;
            info!(
                "ran {spent} cycles: PC={:#06X} A={:#04X} X={:#04X} Y={:#04X} SP={:#04X} P={:#010b}",
                cpu.pc(),
                cpu.a(),
                cpu.x(),
                cpu.y(),
                cpu.sp(),
                cpu.flags().to_byte()
            );
        }
        Err(err) => {
            error!("emulation stopped: {err}");
            std::process::exit(1);
        }
    }
}
