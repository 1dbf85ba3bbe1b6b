mod logging;

use clap::Parser;

use rv32sim::{
    Simulator,
    config::{arch_config::REG_NAME, sim_config},
    cpu::{CpuConfig, UndefinedOpcode},
};

use crate::logging::LogLevel;

#[derive(Debug, Copy, Clone, PartialEq, Eq, clap::ValueEnum)]
enum UndefinedPolicy {
    /// Undefined encodings execute as a silent no-op cycle.
    Nop,
    /// Undefined encodings halt the core.
    Halt,
}

impl From<UndefinedPolicy> for UndefinedOpcode {
    fn from(p: UndefinedPolicy) -> Self {
        match p {
            UndefinedPolicy::Nop => UndefinedOpcode::Nop,
            UndefinedPolicy::Halt => UndefinedOpcode::Halt,
        }
    }
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path of the hex program file (8 hex digits per line).
    path: std::path::PathBuf,

    /// Print per-cycle state while running.
    #[arg(short, long, default_value_t = false)]
    verbose: bool,

    /// Stop after this many cycles.
    #[arg(long = "cycle-limit", default_value_t = sim_config::DEFAULT_CYCLE_LIMIT)]
    cycle_limit: u64,

    /// What an undefined opcode does.
    #[arg(value_enum, long = "undefined", default_value_t = UndefinedPolicy::Nop)]
    undefined: UndefinedPolicy,

    /// Switch log level.
    #[arg(value_enum, long = "loglevel", default_value_t = LogLevel::Info)]
    log_level: LogLevel,
}

fn main() {
    let args = Args::parse();
    let _logger_handle = logging::init(args.log_level);

    let config = CpuConfig {
        cycle_limit: args.cycle_limit,
        undefined_opcode: args.undefined.into(),
    };

    let mut sim = match Simulator::from_hex_file(&args.path, config) {
        Ok(sim) => sim,
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    };

    if args.verbose {
        while sim.state().halted.is_none() {
            println!(
                "Cycle {}: PC = {:#010x}",
                sim.state().cycle_count,
                sim.state().pc
            );
            sim.step();
        }
    } else {
        sim.run();
    }

    let state = sim.state();

    println!("{}", "=".repeat(60));
    println!("Execution Complete");
    println!("{}", "=".repeat(60));
    println!("Cycles executed:       {}", state.cycle_count);
    println!("Instructions executed: {}", state.instruction_count);
    println!("Halted:                {:?}", state.halted);
    println!("Final PC:              {:#010x}", state.pc);

    println!("\nFinal register state (non-zero registers):");
    for (i, &val) in state.registers.iter().enumerate() {
        if val != 0 || i == 0 {
            println!(
                "  x{:<2} ({:>4}): {:#010x} ({})",
                i, REG_NAME[i], val, val as i32
            );
        }
    }

    let nonzero: Vec<_> = sim.cpu().dmem_nonzero();
    if !nonzero.is_empty() {
        println!("\nData memory (non-zero words):");
        for (addr, word) in nonzero {
            println!("  {:#010x}: {:#010x}", addr, word);
        }
    }
}
