mod config;
mod error;
mod execute;
mod instruction;
mod loader;
mod machine;
mod memory;
mod registers;
mod sign_extend;
pub mod signal;
mod terminal;
mod trap;
mod trap_vector;

pub use crate::config::Config;
pub use crate::error::EmulatorError;
use crate::instruction::Instruction;
use crate::machine::Machine;
use crate::terminal::Terminal;
use crate::sign_extend::SignExtend;
use std::error::Error;

/// Loads the configured image and drives the fetch-execute loop until HALT,
/// a fatal opcode, or an asynchronous terminate request.
pub fn run(config: Config) -> Result<(), Box<dyn Error>> {
    let mut machine = Machine::new();
    loader::load_image(&config.image_path, machine.memory_mut())?;

    let mut terminal = Terminal::new();
    let _raw_mode = terminal.enter_raw_mode()?;

    while machine.running {
        if signal::terminate_requested() {
            break;
        }

        let word = machine.fetch(&mut terminal);
        let instruction = Instruction::decode(word);
        execute::execute(&mut machine, instruction, &mut terminal)?;
    }

    Ok(())
}
