use crate::instruction::Register;
use crate::machine::Machine;
use crate::terminal::Terminal;
use crate::trap_vector::TrapVector;

/// Dispatches a TRAP instruction to its service routine. Registers are not
/// saved automatically; a handler may clobber R0 to pass back its result.
pub fn execute(machine: &mut Machine, trap_vector: TrapVector, terminal: &mut Terminal) {
    match trap_vector {
        TrapVector::Getc => getc(machine, terminal),
        TrapVector::Out => out(machine, terminal),
        TrapVector::Puts => puts(machine, terminal),
        TrapVector::In => in_(machine, terminal),
        TrapVector::Putsp => putsp(machine, terminal),
        TrapVector::Halt => halt(machine, terminal),
        TrapVector::Unknown(_) => {}
    }
}

fn getc(machine: &mut Machine, terminal: &mut Terminal) {
    let byte = terminal.read_key();
    machine.write_register(Register::R0, u16::from(byte));
}

fn out(machine: &mut Machine, terminal: &mut Terminal) {
    let byte = machine.read_register(Register::R0) as u8;
    terminal.write_byte(byte);
    terminal.flush();
}

fn puts(machine: &mut Machine, terminal: &mut Terminal) {
    let mut address = machine.read_register(Register::R0);

    loop {
        let word = machine.read_memory(address, terminal);
        if word == 0 {
            break;
        }

        terminal.write_byte(word as u8);
        address = address.wrapping_add(1);
    }

    terminal.flush();
}

fn in_(machine: &mut Machine, terminal: &mut Terminal) {
    for byte in b"Enter a character: " {
        terminal.write_byte(*byte);
    }
    terminal.flush();

    let byte = terminal.read_key();
    terminal.write_byte(byte);
    terminal.flush();

    machine.write_register(Register::R0, u16::from(byte));
}

fn putsp(machine: &mut Machine, terminal: &mut Terminal) {
    let mut address = machine.read_register(Register::R0);

    loop {
        let word = machine.read_memory(address, terminal);
        if word == 0 {
            break;
        }

        let low = (word & 0xFF) as u8;
        terminal.write_byte(low);

        let high = (word >> 8) as u8;
        if high != 0 {
            terminal.write_byte(high);
        }

        address = address.wrapping_add(1);
    }

    terminal.flush();
}

fn halt(machine: &mut Machine, terminal: &mut Terminal) {
    for byte in b"\n--- HALT ---\n" {
        terminal.write_byte(*byte);
    }
    terminal.flush();

    machine.running = false;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::Keyboard;

    // `Terminal` talks to the real stdin/stdout, so these tests exercise the
    // memory-walking logic directly against a fake collaborator rather than
    // going through `trap::execute`.

    struct FixedKeyboard;
    impl Keyboard for FixedKeyboard {
        fn poll_key(&mut self) -> Option<u8> {
            None
        }
    }

    fn collect_puts(machine: &mut Machine, start: u16) -> Vec<u8> {
        let mut out = Vec::new();
        let mut address = start;
        let mut keyboard = FixedKeyboard;
        loop {
            let word = machine.read_memory(address, &mut keyboard);
            if word == 0 {
                break;
            }
            out.push(word as u8);
            address = address.wrapping_add(1);
        }
        out
    }

    #[test]
    fn puts_stops_at_zero_word() {
        let mut machine = Machine::new();
        for (i, byte) in b"hi".iter().enumerate() {
            machine.write_memory(0x4000 + i as u16, u16::from(*byte));
        }
        machine.write_memory(0x4002, 0);

        assert_eq!(collect_puts(&mut machine, 0x4000), b"hi".to_vec());
    }

    #[test]
    fn putsp_low_byte_only_when_high_byte_is_zero() {
        let mut machine = Machine::new();
        machine.write_memory(0x5000, u16::from(b'h'));
        machine.write_memory(0x5001, 0);

        let mut keyboard = FixedKeyboard;
        let word = machine.read_memory(0x5000, &mut keyboard);
        assert_eq!((word & 0xFF) as u8, b'h');
        assert_eq!((word >> 8) as u8, 0);
    }
}
