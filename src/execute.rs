use crate::error::EmulatorError;
use crate::instruction::{Instruction, Register};
use crate::machine::{ConditionFlag, Machine};
use crate::sign_extend::SignExtend;
use crate::terminal::Terminal;
use crate::trap;

/// Applies one decoded instruction to `machine`. `pc` must already have
/// been incremented past the instruction (the fetch step does this) before
/// this runs. Returns an error for the two architecturally fatal opcodes;
/// every other instruction always succeeds.
pub fn execute(
    machine: &mut Machine,
    instruction: Instruction,
    terminal: &mut Terminal,
) -> Result<(), EmulatorError> {
    match instruction {
        Instruction::Br(condition, pc_offset) => {
            let cond = machine.condition();
            let taken = (condition.n && cond == ConditionFlag::Neg)
                || (condition.z && cond == ConditionFlag::Zero)
                || (condition.p && cond == ConditionFlag::Pos);

            if taken {
                machine.pc = machine.pc.wrapping_add(pc_offset.sign_extend(9));
            }
        }

        Instruction::Add(dr, sr1, sr2) => {
            let value = machine
                .read_register(sr1)
                .wrapping_add(machine.read_register(sr2));
            machine.write_register(dr, value);
            machine.update_flags(dr);
        }

        Instruction::AddImm(dr, sr1, imm5) => {
            let value = machine
                .read_register(sr1)
                .wrapping_add(imm5.sign_extend(5));
            machine.write_register(dr, value);
            machine.update_flags(dr);
        }

        Instruction::Ld(dr, pc_offset) => {
            let address = machine.pc.wrapping_add(pc_offset.sign_extend(9));
            let value = machine.read_memory(address, terminal);
            machine.write_register(dr, value);
            machine.update_flags(dr);
        }

        Instruction::St(sr, pc_offset) => {
            let address = machine.pc.wrapping_add(pc_offset.sign_extend(9));
            let value = machine.read_register(sr);
            machine.write_memory(address, value);
        }

        Instruction::Jsr(pc_offset) => {
            let return_address = machine.pc;
            machine.pc = machine.pc.wrapping_add(pc_offset.sign_extend(11));
            machine.write_register(Register::R7, return_address);
        }

        Instruction::Jsrr(base_r) => {
            let return_address = machine.pc;
            machine.pc = machine.read_register(base_r);
            machine.write_register(Register::R7, return_address);
        }

        Instruction::And(dr, sr1, sr2) => {
            let value = machine.read_register(sr1) & machine.read_register(sr2);
            machine.write_register(dr, value);
            machine.update_flags(dr);
        }

        Instruction::AndImm(dr, sr1, imm5) => {
            let value = machine.read_register(sr1) & imm5.sign_extend(5);
            machine.write_register(dr, value);
            machine.update_flags(dr);
        }

        Instruction::Ldr(dr, base_r, offset) => {
            let address = machine
                .read_register(base_r)
                .wrapping_add(offset.sign_extend(6));
            let value = machine.read_memory(address, terminal);
            machine.write_register(dr, value);
            machine.update_flags(dr);
        }

        Instruction::Str(sr, base_r, offset) => {
            let address = machine
                .read_register(base_r)
                .wrapping_add(offset.sign_extend(6));
            let value = machine.read_register(sr);
            machine.write_memory(address, value);
        }

        Instruction::Unused => {
            return Err(EmulatorError::FatalOpcode {
                opcode: 0x8,
                pc: machine.pc.wrapping_sub(1),
            });
        }

        Instruction::Not(dr, sr) => {
            let value = !machine.read_register(sr);
            machine.write_register(dr, value);
            machine.update_flags(dr);
        }

        Instruction::Ldi(dr, pc_offset) => {
            let pointer_address = machine.pc.wrapping_add(pc_offset.sign_extend(9));
            let address = machine.read_memory(pointer_address, terminal);
            let value = machine.read_memory(address, terminal);
            machine.write_register(dr, value);
            machine.update_flags(dr);
        }

        Instruction::Sti(sr, pc_offset) => {
            let pointer_address = machine.pc.wrapping_add(pc_offset.sign_extend(9));
            let address = machine.read_memory(pointer_address, terminal);
            let value = machine.read_register(sr);
            machine.write_memory(address, value);
        }

        Instruction::Jmp(base_r) => {
            machine.pc = machine.read_register(base_r);
        }

        Instruction::Reserved => {
            return Err(EmulatorError::FatalOpcode {
                opcode: 0xd,
                pc: machine.pc.wrapping_sub(1),
            });
        }

        Instruction::Lea(dr, pc_offset) => {
            let address = machine.pc.wrapping_add(pc_offset.sign_extend(9));
            machine.write_register(dr, address);
        }

        Instruction::Trap(trap_vector) => {
            trap::execute(machine, trap_vector, terminal);
        }
    }

    Ok(())
}
