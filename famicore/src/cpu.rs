use crate::bus::SystemBus;

mod opcode;

use self::opcode::{AddrMode, OPCODES_LOOKUP};

const STACK_START: u16 = 0x0100;
const STACK_POINTER_INIT: u8 = 0xFD;

const NMI_VECTOR: u16 = 0xFFFA;
const RESET_VECTOR: u16 = 0xFFFC;
const IRQ_VECTOR: u16 = 0xFFFE;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct StatusFlag: u8 {
        const CARRY             = 0b00000001;
        const ZERO              = 0b00000010;
        const INTERRUPT_DISABLE = 0b00000100;
        const DECIMAL           = 0b00001000;
        const BREAK             = 0b00010000;
        const RESERVED          = 0b00100000;
        const OVERFLOW          = 0b01000000;
        const NEGATIVE          = 0b10000000;
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Interrupt {
    NMI,
    IRQ,
    BRK,
}

/// Fetch/decode/execute engine for the 2A03 core. One call to `tick`
/// retires exactly one instruction and reports the cycles it cost, so a
/// caller can keep the rest of the machine in step.
pub struct Cpu6502 {
    pub(crate) accumulator: u8,
    pub(crate) x_index_reg: u8,
    pub(crate) y_index_reg: u8,
    pub(crate) program_counter: u16,
    pub(crate) stack_pointer: u8,
    pub(crate) processor_status: StatusFlag,

    addr_mode: AddrMode,
    operand_addr: u16,
    operand_data: u8,
    page_crossed: bool,
    pending_interrupt: Option<Interrupt>,

    pub total_cycles: u64,
}

impl Cpu6502 {
    pub fn new() -> Self {
        Cpu6502 {
            accumulator: 0,
            x_index_reg: 0,
            y_index_reg: 0,
            program_counter: 0,
            stack_pointer: STACK_POINTER_INIT,
            processor_status: StatusFlag::ZERO | StatusFlag::RESERVED,
            addr_mode: AddrMode::IMP,
            operand_addr: 0,
            operand_data: 0,
            page_crossed: false,
            pending_interrupt: None,
            total_cycles: 0,
        }
    }

    /// Cold-boot register pattern, with the handful of APU registers the
    /// stock firmware state expects to be silenced.
    pub fn power_on(&mut self, bus: &mut SystemBus) {
        self.accumulator = 0;
        self.x_index_reg = 0;
        self.y_index_reg = 0;
        self.stack_pointer = STACK_POINTER_INIT;
        self.processor_status = StatusFlag::ZERO | StatusFlag::RESERVED;
        self.program_counter = self.get_address(bus, RESET_VECTOR);
        self.pending_interrupt = None;
        self.total_cycles = 0;

        bus.set(0x4017, 0x00);
        bus.set(0x4015, 0x00);
        bus.set(0x4000, 0x00);
    }

    /// Warm reset. Registers survive apart from the stack pointer slipping
    /// down by three and the interrupt-disable flag latching on.
    pub fn reset(&mut self, bus: &mut SystemBus) {
        self.stack_pointer = self.stack_pointer.wrapping_sub(3);
        self.processor_status.insert(StatusFlag::INTERRUPT_DISABLE);
        self.program_counter = self.get_address(bus, RESET_VECTOR);

        bus.set(0x4015, 0x00);
    }

    /// Services any pending interrupt, then fetches and executes the next
    /// instruction. Returns the cycles consumed by both.
    pub fn tick(&mut self, bus: &mut SystemBus) -> u32 {
        let mut cycles = 0;

        if let Some(interrupt) = self.pending_interrupt.take() {
            cycles += self.service_interrupt(bus, interrupt);
        }

        let opcode = self.advance_pc(bus);
        cycles += OPCODES_LOOKUP[opcode as usize].execute_op(self, bus);

        self.total_cycles += cycles as u64;
        cycles
    }

    /// Latches an interrupt to be serviced at the start of the next tick.
    /// Only one can be pending; the most recent request wins.
    pub fn trigger_interrupt(&mut self, interrupt: Interrupt) {
        self.pending_interrupt = Some(interrupt);
    }

    // The latch always costs the full service time once it fires, even
    // when the interrupt-disable flag swallows a maskable request.
    fn service_interrupt(&mut self, bus: &mut SystemBus, interrupt: Interrupt) -> u32 {
        match interrupt {
            Interrupt::NMI => {
                self.push_address(bus, self.program_counter);
                self.push(bus, self.processor_status.bits());
                self.set_flag(StatusFlag::INTERRUPT_DISABLE, true);
                self.set_flag(StatusFlag::BREAK, false);
                self.program_counter = self.get_address(bus, NMI_VECTOR);
            }
            Interrupt::IRQ => {
                if !self.get_flag(StatusFlag::INTERRUPT_DISABLE) {
                    self.push_address(bus, self.program_counter);
                    self.push(bus, self.processor_status.bits());
                    self.set_flag(StatusFlag::INTERRUPT_DISABLE, true);
                    self.set_flag(StatusFlag::BREAK, false);
                    self.program_counter = self.get_address(bus, IRQ_VECTOR);
                }
            }
            Interrupt::BRK => {
                if !self.get_flag(StatusFlag::INTERRUPT_DISABLE) {
                    self.set_flag(StatusFlag::BREAK, true);
                    self.program_counter = self.program_counter.wrapping_add(1);
                    self.push_address(bus, self.program_counter);
                    self.push(bus, self.processor_status.bits());
                    self.set_flag(StatusFlag::INTERRUPT_DISABLE, true);
                    self.program_counter = self.get_address(bus, IRQ_VECTOR);
                }
            }
        }

        7
    }

    fn advance_pc(&mut self, bus: &mut SystemBus) -> u8 {
        let byte = bus.get(self.program_counter);
        self.program_counter = self.program_counter.wrapping_add(1);
        byte
    }

    // 16-bit values sit in memory high byte first, vectors included.
    fn get_address(&self, bus: &mut SystemBus, addr: u16) -> u16 {
        let hi = bus.get(addr) as u16;
        let lo = bus.get(addr.wrapping_add(1)) as u16;
        (hi << 8) | lo
    }

    fn fetch_abs_address(&mut self, bus: &mut SystemBus) -> u16 {
        let hi = self.advance_pc(bus) as u16;
        let lo = self.advance_pc(bus) as u16;
        (hi << 8) | lo
    }

    fn pages_differ(a: u16, b: u16) -> bool {
        a & 0xFF00 != b & 0xFF00
    }

    fn set_operand_addr(&mut self, addr_mode: AddrMode, addr: u16) {
        self.addr_mode = addr_mode;
        self.operand_addr = addr;
        self.operand_data = 0;
        self.page_crossed = false;
    }

    fn set_operand_data(&mut self, addr_mode: AddrMode, data: u8) {
        self.addr_mode = addr_mode;
        self.operand_addr = 0;
        self.operand_data = data;
        self.page_crossed = false;
    }

    fn imp_addressing(&mut self, _bus: &mut SystemBus) {
        self.set_operand_data(AddrMode::IMP, 0);
    }

    fn acc_addressing(&mut self, _bus: &mut SystemBus) {
        self.set_operand_data(AddrMode::ACC, self.accumulator);
    }

    fn imm_addressing(&mut self, bus: &mut SystemBus) {
        let data = self.advance_pc(bus);
        self.set_operand_data(AddrMode::IMM, data);
    }

    fn zpg_addressing(&mut self, bus: &mut SystemBus) {
        let addr = self.advance_pc(bus) as u16;
        self.set_operand_addr(AddrMode::ZPG, addr);
    }

    fn zpx_addressing(&mut self, bus: &mut SystemBus) {
        let addr = self.advance_pc(bus).wrapping_add(self.x_index_reg) as u16;
        self.set_operand_addr(AddrMode::ZPX, addr);
    }

    fn zpy_addressing(&mut self, bus: &mut SystemBus) {
        let addr = self.advance_pc(bus).wrapping_add(self.y_index_reg) as u16;
        self.set_operand_addr(AddrMode::ZPY, addr);
    }

    // Branch target is relative to the address of the next instruction.
    fn rel_addressing(&mut self, bus: &mut SystemBus) {
        let offset = self.advance_pc(bus) as i8;
        let addr = (self.program_counter as i32 + offset as i32) as u16;
        self.set_operand_addr(AddrMode::REL, addr);
    }

    fn abs_addressing(&mut self, bus: &mut SystemBus) {
        let addr = self.fetch_abs_address(bus);
        self.set_operand_addr(AddrMode::ABS, addr);
    }

    fn abx_addressing(&mut self, bus: &mut SystemBus) {
        let base = self.fetch_abs_address(bus);
        let addr = base.wrapping_add(self.x_index_reg as u16);
        self.set_operand_addr(AddrMode::ABX, addr);
        self.page_crossed = Self::pages_differ(base, addr);
    }

    fn aby_addressing(&mut self, bus: &mut SystemBus) {
        let base = self.fetch_abs_address(bus);
        let addr = base.wrapping_add(self.y_index_reg as u16);
        self.set_operand_addr(AddrMode::ABY, addr);
        self.page_crossed = Self::pages_differ(base, addr);
    }

    fn ind_addressing(&mut self, bus: &mut SystemBus) {
        let ptr = self.fetch_abs_address(bus);
        let addr = self.get_address(bus, ptr);
        self.set_operand_addr(AddrMode::IND, addr);
    }

    // The pointer wraps within the zero page; the pair read does not.
    fn inx_addressing(&mut self, bus: &mut SystemBus) {
        let ptr = self.advance_pc(bus).wrapping_add(self.x_index_reg) as u16;
        let addr = self.get_address(bus, ptr);
        self.set_operand_addr(AddrMode::INX, addr);
    }

    fn iny_addressing(&mut self, bus: &mut SystemBus) {
        let ptr = self.advance_pc(bus) as u16;
        let base = self.get_address(bus, ptr);
        let addr = base.wrapping_add(self.y_index_reg as u16);
        self.set_operand_addr(AddrMode::INY, addr);
        self.page_crossed = Self::pages_differ(base, addr);
    }

    fn read_operand(&mut self, bus: &mut SystemBus) -> u8 {
        match self.addr_mode {
            AddrMode::IMP => panic!("implied addressing carries no operand"),
            AddrMode::ACC | AddrMode::IMM => self.operand_data,
            _ => bus.get(self.operand_addr),
        }
    }

    fn write_operand(&mut self, bus: &mut SystemBus, data: u8) {
        match self.addr_mode {
            AddrMode::ACC | AddrMode::IMP => self.accumulator = data,
            _ => bus.set(self.operand_addr, data),
        }
    }

    fn push(&mut self, bus: &mut SystemBus, data: u8) {
        bus.set(STACK_START + self.stack_pointer as u16, data);
        self.stack_pointer = self.stack_pointer.wrapping_sub(1);
    }

    fn pop(&mut self, bus: &mut SystemBus) -> u8 {
        self.stack_pointer = self.stack_pointer.wrapping_add(1);
        bus.get(STACK_START + self.stack_pointer as u16)
    }

    // Address pushes leave the high byte at the lower stack address.
    fn push_address(&mut self, bus: &mut SystemBus, addr: u16) {
        self.push(bus, addr as u8);
        self.push(bus, (addr >> 8) as u8);
    }

    fn pop_address(&mut self, bus: &mut SystemBus) -> u16 {
        let hi = self.pop(bus) as u16;
        let lo = self.pop(bus) as u16;
        (hi << 8) | lo
    }

    fn get_flag(&self, flag: StatusFlag) -> bool {
        self.processor_status.contains(flag)
    }

    fn set_flag(&mut self, flag: StatusFlag, condition: bool) {
        self.processor_status.set(flag, condition);
    }

    fn set_z_and_n_flag(&mut self, data: u8) {
        self.set_flag(StatusFlag::ZERO, data == 0);
        self.set_flag(StatusFlag::NEGATIVE, data & 0x80 != 0);
    }

    fn branch_if_cond(&mut self, condition: bool) -> u32 {
        if condition {
            let crosses_page = Self::pages_differ(self.program_counter, self.operand_addr);
            self.program_counter = self.operand_addr;
            1 + crosses_page as u32
        } else {
            0
        }
    }

    fn compare_register(&mut self, bus: &mut SystemBus, register: u8) -> u32 {
        let data = self.read_operand(bus);
        let diff = register.wrapping_sub(data);

        self.set_flag(StatusFlag::CARRY, diff & 0x80 == 0);
        self.set_flag(StatusFlag::ZERO, diff == 0);
        self.set_flag(StatusFlag::NEGATIVE, diff & 0x80 != 0);

        0
    }

    fn add_with_carry(&mut self, bus: &mut SystemBus) -> u32 {
        let data = self.read_operand(bus);
        let carry = self.get_flag(StatusFlag::CARRY) as u16;
        let sum = self.accumulator as u16 + data as u16 + carry;
        let result = sum as u8;

        self.set_flag(StatusFlag::CARRY, sum > 0xFF);
        self.set_flag(
            StatusFlag::OVERFLOW,
            (self.accumulator ^ data) & 0x80 == 0 && (self.accumulator ^ result) & 0x80 != 0,
        );
        self.set_z_and_n_flag(result);
        self.accumulator = result;

        0
    }

    fn subtract_with_carry(&mut self, bus: &mut SystemBus) -> u32 {
        let data = self.read_operand(bus);
        let borrow = !self.get_flag(StatusFlag::CARRY) as u8;
        let (partial, overflow1) = self.accumulator.overflowing_sub(data);
        let (result, overflow2) = partial.overflowing_sub(borrow);

        self.set_flag(StatusFlag::CARRY, !overflow1 && !overflow2);
        self.set_flag(
            StatusFlag::OVERFLOW,
            (self.accumulator ^ data) & 0x80 != 0 && (self.accumulator ^ result) & 0x80 != 0,
        );
        self.set_z_and_n_flag(result);
        self.accumulator = result;

        0
    }

    fn and_accumulator(&mut self, bus: &mut SystemBus) -> u32 {
        self.accumulator &= self.read_operand(bus);
        self.set_z_and_n_flag(self.accumulator);
        0
    }

    fn or_accumulator(&mut self, bus: &mut SystemBus) -> u32 {
        self.accumulator |= self.read_operand(bus);
        self.set_z_and_n_flag(self.accumulator);
        0
    }

    fn exclusive_or_accumulator(&mut self, bus: &mut SystemBus) -> u32 {
        self.accumulator ^= self.read_operand(bus);
        self.set_z_and_n_flag(self.accumulator);
        0
    }

    fn arithmetic_shift_left(&mut self, bus: &mut SystemBus) -> u32 {
        let data = self.read_operand(bus);
        let result = data << 1;

        self.set_flag(StatusFlag::CARRY, data & 0x80 != 0);
        self.set_z_and_n_flag(result);
        self.write_operand(bus, result);

        0
    }

    fn logical_shift_right(&mut self, bus: &mut SystemBus) -> u32 {
        let data = self.read_operand(bus);
        let result = data >> 1;

        self.set_flag(StatusFlag::CARRY, data & 0x01 != 0);
        self.set_z_and_n_flag(result);
        self.write_operand(bus, result);

        0
    }

    fn rotate_left(&mut self, bus: &mut SystemBus) -> u32 {
        let data = self.read_operand(bus);
        let result = (data << 1) | self.get_flag(StatusFlag::CARRY) as u8;

        self.set_flag(StatusFlag::CARRY, data & 0x80 != 0);
        self.set_z_and_n_flag(result);
        self.write_operand(bus, result);

        0
    }

    fn rotate_right(&mut self, bus: &mut SystemBus) -> u32 {
        let data = self.read_operand(bus);
        let result = (data >> 1) | (self.get_flag(StatusFlag::CARRY) as u8) << 7;

        self.set_flag(StatusFlag::CARRY, data & 0x01 != 0);
        self.set_z_and_n_flag(result);
        self.write_operand(bus, result);

        0
    }

    fn branch_if_carry_clear(&mut self, _bus: &mut SystemBus) -> u32 {
        self.branch_if_cond(!self.get_flag(StatusFlag::CARRY))
    }

    fn branch_if_carry_set(&mut self, _bus: &mut SystemBus) -> u32 {
        self.branch_if_cond(self.get_flag(StatusFlag::CARRY))
    }

    fn branch_if_equal(&mut self, _bus: &mut SystemBus) -> u32 {
        self.branch_if_cond(self.get_flag(StatusFlag::ZERO))
    }

    fn branch_if_not_equal(&mut self, _bus: &mut SystemBus) -> u32 {
        self.branch_if_cond(!self.get_flag(StatusFlag::ZERO))
    }

    fn branch_if_minus(&mut self, _bus: &mut SystemBus) -> u32 {
        self.branch_if_cond(self.get_flag(StatusFlag::NEGATIVE))
    }

    fn branch_if_positive(&mut self, _bus: &mut SystemBus) -> u32 {
        self.branch_if_cond(!self.get_flag(StatusFlag::NEGATIVE))
    }

    fn branch_if_overflow_clear(&mut self, _bus: &mut SystemBus) -> u32 {
        self.branch_if_cond(!self.get_flag(StatusFlag::OVERFLOW))
    }

    fn branch_if_overflow_set(&mut self, _bus: &mut SystemBus) -> u32 {
        self.branch_if_cond(self.get_flag(StatusFlag::OVERFLOW))
    }

    fn bit_test(&mut self, bus: &mut SystemBus) -> u32 {
        let data = self.read_operand(bus);

        self.set_flag(StatusFlag::ZERO, self.accumulator & data == 0);
        self.set_flag(StatusFlag::OVERFLOW, data & 0x40 != 0);
        self.set_flag(StatusFlag::NEGATIVE, data & 0x80 != 0);

        0
    }

    fn force_interrupt(&mut self, _bus: &mut SystemBus) -> u32 {
        self.trigger_interrupt(Interrupt::BRK);
        0
    }

    fn clear_carry(&mut self, _bus: &mut SystemBus) -> u32 {
        self.set_flag(StatusFlag::CARRY, false);
        0
    }

    fn clear_decimal(&mut self, _bus: &mut SystemBus) -> u32 {
        self.set_flag(StatusFlag::DECIMAL, false);
        0
    }

    fn clear_interrupt_disable(&mut self, _bus: &mut SystemBus) -> u32 {
        self.set_flag(StatusFlag::INTERRUPT_DISABLE, false);
        0
    }

    fn clear_overflow(&mut self, _bus: &mut SystemBus) -> u32 {
        self.set_flag(StatusFlag::OVERFLOW, false);
        0
    }

    fn set_carry(&mut self, _bus: &mut SystemBus) -> u32 {
        self.set_flag(StatusFlag::CARRY, true);
        0
    }

    fn set_decimal(&mut self, _bus: &mut SystemBus) -> u32 {
        self.set_flag(StatusFlag::DECIMAL, true);
        0
    }

    fn set_interrupt_disable(&mut self, _bus: &mut SystemBus) -> u32 {
        self.set_flag(StatusFlag::INTERRUPT_DISABLE, true);
        0
    }

    fn compare_accumulator(&mut self, bus: &mut SystemBus) -> u32 {
        self.compare_register(bus, self.accumulator)
    }

    fn compare_x_register(&mut self, bus: &mut SystemBus) -> u32 {
        self.compare_register(bus, self.x_index_reg)
    }

    fn compare_y_register(&mut self, bus: &mut SystemBus) -> u32 {
        self.compare_register(bus, self.y_index_reg)
    }

    fn decrement_memory(&mut self, bus: &mut SystemBus) -> u32 {
        let result = self.read_operand(bus).wrapping_sub(1);
        self.set_z_and_n_flag(result);
        self.write_operand(bus, result);
        0
    }

    fn decrement_x_register(&mut self, _bus: &mut SystemBus) -> u32 {
        self.x_index_reg = self.x_index_reg.wrapping_sub(1);
        self.set_z_and_n_flag(self.x_index_reg);
        0
    }

    fn decrement_y_register(&mut self, _bus: &mut SystemBus) -> u32 {
        self.y_index_reg = self.y_index_reg.wrapping_sub(1);
        self.set_z_and_n_flag(self.y_index_reg);
        0
    }

    fn increment_memory(&mut self, bus: &mut SystemBus) -> u32 {
        let result = self.read_operand(bus).wrapping_add(1);
        self.set_z_and_n_flag(result);
        self.write_operand(bus, result);
        0
    }

    fn increment_x_register(&mut self, _bus: &mut SystemBus) -> u32 {
        self.x_index_reg = self.x_index_reg.wrapping_add(1);
        self.set_z_and_n_flag(self.x_index_reg);
        0
    }

    fn increment_y_register(&mut self, _bus: &mut SystemBus) -> u32 {
        self.y_index_reg = self.y_index_reg.wrapping_add(1);
        self.set_z_and_n_flag(self.y_index_reg);
        0
    }

    fn jump(&mut self, _bus: &mut SystemBus) -> u32 {
        self.program_counter = self.operand_addr;
        0
    }

    fn jump_to_subroutine(&mut self, bus: &mut SystemBus) -> u32 {
        self.push_address(bus, self.program_counter.wrapping_sub(1));
        self.program_counter = self.operand_addr;
        0
    }

    fn return_from_subroutine(&mut self, bus: &mut SystemBus) -> u32 {
        self.program_counter = self.pop_address(bus).wrapping_add(1);
        0
    }

    fn return_from_interrupt(&mut self, bus: &mut SystemBus) -> u32 {
        self.processor_status = StatusFlag::from_bits_truncate(self.pop(bus));
        self.program_counter = self.pop_address(bus);
        0
    }

    fn load_accumulator(&mut self, bus: &mut SystemBus) -> u32 {
        self.accumulator = self.read_operand(bus);
        self.set_z_and_n_flag(self.accumulator);
        0
    }

    fn load_x_register(&mut self, bus: &mut SystemBus) -> u32 {
        self.x_index_reg = self.read_operand(bus);
        self.set_z_and_n_flag(self.x_index_reg);
        0
    }

    fn load_y_register(&mut self, bus: &mut SystemBus) -> u32 {
        self.y_index_reg = self.read_operand(bus);
        self.set_z_and_n_flag(self.y_index_reg);
        0
    }

    fn store_accumulator(&mut self, bus: &mut SystemBus) -> u32 {
        self.write_operand(bus, self.accumulator);
        0
    }

    fn store_x_register(&mut self, bus: &mut SystemBus) -> u32 {
        self.write_operand(bus, self.x_index_reg);
        0
    }

    fn store_y_register(&mut self, bus: &mut SystemBus) -> u32 {
        self.write_operand(bus, self.y_index_reg);
        0
    }

    fn no_operation(&mut self, _bus: &mut SystemBus) -> u32 {
        0
    }

    fn push_accumulator(&mut self, bus: &mut SystemBus) -> u32 {
        self.push(bus, self.accumulator);
        0
    }

    // The status byte crosses the stack unmodified in both directions.
    fn push_processor_status(&mut self, bus: &mut SystemBus) -> u32 {
        self.push(bus, self.processor_status.bits());
        0
    }

    fn pull_accumulator(&mut self, bus: &mut SystemBus) -> u32 {
        self.accumulator = self.pop(bus);
        self.set_z_and_n_flag(self.accumulator);
        0
    }

    fn pull_processor_status(&mut self, bus: &mut SystemBus) -> u32 {
        self.processor_status = StatusFlag::from_bits_truncate(self.pop(bus));
        0
    }

    fn transfer_accumulator_to_x(&mut self, _bus: &mut SystemBus) -> u32 {
        self.x_index_reg = self.accumulator;
        self.set_z_and_n_flag(self.x_index_reg);
        0
    }

    fn transfer_accumulator_to_y(&mut self, _bus: &mut SystemBus) -> u32 {
        self.y_index_reg = self.accumulator;
        self.set_z_and_n_flag(self.y_index_reg);
        0
    }

    fn transfer_stack_pointer_to_x(&mut self, _bus: &mut SystemBus) -> u32 {
        self.x_index_reg = self.stack_pointer;
        self.set_z_and_n_flag(self.x_index_reg);
        0
    }

    fn transfer_x_to_accumulator(&mut self, _bus: &mut SystemBus) -> u32 {
        self.accumulator = self.x_index_reg;
        self.set_z_and_n_flag(self.accumulator);
        0
    }

    fn transfer_x_to_stack_pointer(&mut self, _bus: &mut SystemBus) -> u32 {
        self.stack_pointer = self.x_index_reg;
        0
    }

    fn transfer_y_to_accumulator(&mut self, _bus: &mut SystemBus) -> u32 {
        self.accumulator = self.y_index_reg;
        self.set_z_and_n_flag(self.accumulator);
        0
    }

    // All undocumented slots share one policy: the operand bytes are
    // consumed, nothing else happens.
    fn illegal_opcode(&mut self, _bus: &mut SystemBus) -> u32 {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROGRAM_START: u16 = 0x0400;

    fn setup(program: &[u8]) -> (Cpu6502, SystemBus) {
        let mut bus = SystemBus::test_new();
        let mut cpu = Cpu6502::new();

        bus.load_ram(PROGRAM_START, program);
        cpu.program_counter = PROGRAM_START;

        (cpu, bus)
    }

    #[test]
    fn test_lda_addressing_modes() {
        // immediate
        let (mut cpu, mut bus) = setup(&[0xA9, 0x42]);
        cpu.tick(&mut bus);
        assert_eq!(cpu.accumulator, 0x42);
        assert!(!cpu.get_flag(StatusFlag::ZERO));
        assert!(!cpu.get_flag(StatusFlag::NEGATIVE));

        // zero page
        let (mut cpu, mut bus) = setup(&[0xA5, 0x10]);
        bus.set(0x0010, 0x99);
        cpu.tick(&mut bus);
        assert_eq!(cpu.accumulator, 0x99);
        assert!(cpu.get_flag(StatusFlag::NEGATIVE));

        // absolute, operand stored high byte first
        let (mut cpu, mut bus) = setup(&[0xAD, 0x02, 0x00]);
        bus.set(0x0200, 0x77);
        cpu.tick(&mut bus);
        assert_eq!(cpu.accumulator, 0x77);

        // zero page,X wraps within the page
        let (mut cpu, mut bus) = setup(&[0xB5, 0xFF]);
        cpu.x_index_reg = 0x05;
        bus.set(0x0004, 0x55);
        cpu.tick(&mut bus);
        assert_eq!(cpu.accumulator, 0x55);

        // (indirect,X)
        let (mut cpu, mut bus) = setup(&[0xA1, 0x20]);
        cpu.x_index_reg = 0x04;
        bus.set(0x0024, 0x06);
        bus.set(0x0025, 0x10);
        bus.set(0x0610, 0x5A);
        cpu.tick(&mut bus);
        assert_eq!(cpu.accumulator, 0x5A);

        // (indirect),Y
        let (mut cpu, mut bus) = setup(&[0xB1, 0x40]);
        cpu.y_index_reg = 0x10;
        bus.set(0x0040, 0x06);
        bus.set(0x0041, 0x00);
        bus.set(0x0610, 0x3C);
        cpu.tick(&mut bus);
        assert_eq!(cpu.accumulator, 0x3C);
    }

    #[test]
    fn test_zero_flag_set_on_zero_load() {
        let (mut cpu, mut bus) = setup(&[0xA9, 0x00]);
        cpu.tick(&mut bus);
        assert!(cpu.get_flag(StatusFlag::ZERO));
    }

    #[test]
    fn test_stack_image_keeps_high_byte_at_lower_address() {
        let (mut cpu, mut bus) = setup(&[]);

        cpu.push_address(&mut bus, 0x1234);
        assert_eq!(cpu.stack_pointer, 0xFB);
        assert_eq!(bus.get(0x01FD), 0x34);
        assert_eq!(bus.get(0x01FC), 0x12);

        assert_eq!(cpu.pop_address(&mut bus), 0x1234);
        assert_eq!(cpu.stack_pointer, 0xFD);

        cpu.push(&mut bus, 0xAB);
        assert_eq!(bus.get(0x01FD), 0xAB);
        assert_eq!(cpu.pop(&mut bus), 0xAB);
    }

    fn do_adc(a: u8, data: u8, carry_in: bool) -> (u8, bool, bool) {
        let (mut cpu, mut bus) = setup(&[0x69, data]);
        cpu.accumulator = a;
        cpu.set_flag(StatusFlag::CARRY, carry_in);
        cpu.tick(&mut bus);
        (
            cpu.accumulator,
            cpu.get_flag(StatusFlag::CARRY),
            cpu.get_flag(StatusFlag::OVERFLOW),
        )
    }

    #[test]
    fn test_adc_result_carry_and_overflow() {
        assert_eq!(do_adc(0x01, 0x01, false), (0x02, false, false));
        assert_eq!(do_adc(0x7F, 0x01, false), (0x80, false, true));
        assert_eq!(do_adc(0x7F, 0x7F, false), (0xFE, false, true));
        assert_eq!(do_adc(0x80, 0x80, false), (0x00, true, true));
        assert_eq!(do_adc(0xFF, 0x01, false), (0x00, true, false));
        assert_eq!(do_adc(0x50, 0x10, true), (0x61, false, false));
    }

    fn do_sbc(a: u8, data: u8, carry_in: bool) -> (u8, bool, bool) {
        let (mut cpu, mut bus) = setup(&[0xE9, data]);
        cpu.accumulator = a;
        cpu.set_flag(StatusFlag::CARRY, carry_in);
        cpu.tick(&mut bus);
        (
            cpu.accumulator,
            cpu.get_flag(StatusFlag::CARRY),
            cpu.get_flag(StatusFlag::OVERFLOW),
        )
    }

    #[test]
    fn test_sbc_result_carry_and_overflow() {
        assert_eq!(do_sbc(0x03, 0x01, true), (0x02, true, false));
        assert_eq!(do_sbc(0x64, 0x32, true), (0x32, true, false));
        assert_eq!(do_sbc(0x80, 0x01, true), (0x7F, true, true));
        assert_eq!(do_sbc(0x00, 0x01, true), (0xFF, false, false));
        assert_eq!(do_sbc(0x0A, 0x05, false), (0x04, true, false));
    }

    #[test]
    fn test_decimal_flag_is_stored_but_ignored() {
        let (mut cpu, mut bus) = setup(&[0xF8, 0x69, 0x01, 0xD8]);
        cpu.accumulator = 0x09;

        cpu.tick(&mut bus);
        assert!(cpu.get_flag(StatusFlag::DECIMAL));

        // binary add, no decimal adjust
        cpu.tick(&mut bus);
        assert_eq!(cpu.accumulator, 0x0A);

        cpu.tick(&mut bus);
        assert!(!cpu.get_flag(StatusFlag::DECIMAL));
    }

    #[test]
    fn test_compare_carry_tracks_difference_sign() {
        let cases = [
            (0x10u8, 0x10u8, true, true, false),
            (0x10, 0x20, false, false, true),
            (0x20, 0x10, true, false, false),
            (0x90, 0x00, false, false, true),
        ];

        for (a, data, carry, zero, negative) in cases {
            let (mut cpu, mut bus) = setup(&[0xC9, data]);
            cpu.accumulator = a;
            cpu.tick(&mut bus);
            assert_eq!(cpu.get_flag(StatusFlag::CARRY), carry, "A={:02X} M={:02X}", a, data);
            assert_eq!(cpu.get_flag(StatusFlag::ZERO), zero);
            assert_eq!(cpu.get_flag(StatusFlag::NEGATIVE), negative);
        }
    }

    #[test]
    fn test_shifts_and_rotates_on_accumulator() {
        let (mut cpu, mut bus) = setup(&[0x0A]);
        cpu.accumulator = 0x81;
        cpu.tick(&mut bus);
        assert_eq!(cpu.accumulator, 0x02);
        assert!(cpu.get_flag(StatusFlag::CARRY));

        let (mut cpu, mut bus) = setup(&[0x6A]);
        cpu.accumulator = 0x01;
        cpu.set_flag(StatusFlag::CARRY, true);
        cpu.tick(&mut bus);
        assert_eq!(cpu.accumulator, 0x80);
        assert!(cpu.get_flag(StatusFlag::CARRY));
        assert!(cpu.get_flag(StatusFlag::NEGATIVE));

        let (mut cpu, mut bus) = setup(&[0x4A]);
        cpu.accumulator = 0x01;
        cpu.tick(&mut bus);
        assert_eq!(cpu.accumulator, 0x00);
        assert!(cpu.get_flag(StatusFlag::CARRY));
        assert!(cpu.get_flag(StatusFlag::ZERO));
    }

    #[test]
    fn test_inc_dec_memory_wraps() {
        let (mut cpu, mut bus) = setup(&[0xE6, 0x40, 0xC6, 0x40]);
        bus.set(0x0040, 0xFF);

        cpu.tick(&mut bus);
        assert_eq!(bus.get(0x0040), 0x00);
        assert!(cpu.get_flag(StatusFlag::ZERO));

        cpu.tick(&mut bus);
        assert_eq!(bus.get(0x0040), 0xFF);
        assert!(cpu.get_flag(StatusFlag::NEGATIVE));
    }

    #[test]
    fn test_branch_cycle_accounting() {
        // taken, same page (the fresh status register has the zero flag set)
        let (mut cpu, mut bus) = setup(&[0xF0, 0x02]);
        assert_eq!(cpu.tick(&mut bus), 3);
        assert_eq!(cpu.program_counter, PROGRAM_START + 4);

        // not taken
        let (mut cpu, mut bus) = setup(&[0xD0, 0x02]);
        assert_eq!(cpu.tick(&mut bus), 2);
        assert_eq!(cpu.program_counter, PROGRAM_START + 2);

        // taken across a page boundary
        let mut bus = SystemBus::test_new();
        let mut cpu = Cpu6502::new();
        bus.load_ram(0x04F0, &[0xF0, 0x20]);
        cpu.program_counter = 0x04F0;
        assert_eq!(cpu.tick(&mut bus), 4);
        assert_eq!(cpu.program_counter, 0x0512);
    }

    #[test]
    fn test_absolute_indexed_page_cross_costs_a_cycle() {
        let (mut cpu, mut bus) = setup(&[0xBD, 0x01, 0xFF]);
        cpu.x_index_reg = 0x02;
        assert_eq!(cpu.tick(&mut bus), 5);

        let (mut cpu, mut bus) = setup(&[0xBD, 0x01, 0x80]);
        cpu.x_index_reg = 0x02;
        assert_eq!(cpu.tick(&mut bus), 4);

        // stores pay the fixed price either way
        let (mut cpu, mut bus) = setup(&[0x9D, 0x01, 0xFF]);
        cpu.x_index_reg = 0x02;
        assert_eq!(cpu.tick(&mut bus), 5);
    }

    #[test]
    fn test_jmp_indirect_follows_pointer() {
        let (mut cpu, mut bus) = setup(&[0x6C, 0x02, 0x00]);
        bus.set(0x0200, 0x06);
        bus.set(0x0201, 0x10);
        assert_eq!(cpu.tick(&mut bus), 5);
        assert_eq!(cpu.program_counter, 0x0610);
    }

    #[test]
    fn test_jsr_rts_roundtrip() {
        let (mut cpu, mut bus) = setup(&[0x20, 0x06, 0x00]);
        bus.set(0x0600, 0x60);

        assert_eq!(cpu.tick(&mut bus), 6);
        assert_eq!(cpu.program_counter, 0x0600);
        assert_eq!(cpu.stack_pointer, 0xFB);
        // return address is the last byte of the JSR instruction
        assert_eq!(bus.get(0x01FC), 0x04);
        assert_eq!(bus.get(0x01FD), 0x02);

        assert_eq!(cpu.tick(&mut bus), 6);
        assert_eq!(cpu.program_counter, PROGRAM_START + 3);
        assert_eq!(cpu.stack_pointer, 0xFD);
    }

    #[test]
    fn test_php_plp_carry_status_verbatim() {
        // break set, reserved clear: neither bit gets repainted in transit
        let (mut cpu, mut bus) = setup(&[0x08, 0x28]);
        let status = StatusFlag::from_bits_truncate(0b1001_0101);
        cpu.processor_status = status;

        cpu.tick(&mut bus);
        assert_eq!(bus.get(0x01FD), 0b1001_0101);

        cpu.processor_status = StatusFlag::empty();
        cpu.tick(&mut bus);
        assert_eq!(cpu.processor_status, status);
    }

    #[test]
    fn test_brk_services_through_irq_vector() {
        let (mut cpu, mut bus) = setup(&[0x00]);
        bus.set(0xFFFE, 0x06);
        bus.set(0xFFFF, 0x00);
        bus.set(0x0600, 0xEA);

        // the break itself only latches
        assert_eq!(cpu.tick(&mut bus), 7);
        assert_eq!(cpu.program_counter, PROGRAM_START + 1);

        // next tick services the latch, then runs the handler's first op
        assert_eq!(cpu.tick(&mut bus), 7 + 2);
        assert_eq!(cpu.program_counter, 0x0601);
        assert!(cpu.get_flag(StatusFlag::INTERRUPT_DISABLE));
        assert!(cpu.get_flag(StatusFlag::BREAK));

        // pushed return address skips the byte after the break
        assert_eq!(bus.get(0x01FC), 0x04);
        assert_eq!(bus.get(0x01FD), 0x02);
        assert_eq!(bus.get(0x01FB), 0b0011_0010);
    }

    #[test]
    fn test_irq_blocked_by_interrupt_disable_still_costs_service_time() {
        let (mut cpu, mut bus) = setup(&[0xEA, 0xEA]);
        cpu.set_flag(StatusFlag::INTERRUPT_DISABLE, true);
        cpu.trigger_interrupt(Interrupt::IRQ);

        assert_eq!(cpu.tick(&mut bus), 7 + 2);
        assert_eq!(cpu.program_counter, PROGRAM_START + 1);
        assert_eq!(cpu.stack_pointer, 0xFD);

        // the latch was consumed
        assert_eq!(cpu.tick(&mut bus), 2);
    }

    #[test]
    fn test_nmi_ignores_interrupt_disable() {
        let (mut cpu, mut bus) = setup(&[0xEA]);
        bus.set(0xFFFA, 0x06);
        bus.set(0xFFFB, 0x00);
        bus.set(0x0600, 0xEA);
        cpu.set_flag(StatusFlag::INTERRUPT_DISABLE, true);
        cpu.trigger_interrupt(Interrupt::NMI);

        assert_eq!(cpu.tick(&mut bus), 7 + 2);
        assert_eq!(cpu.program_counter, 0x0601);
        assert_eq!(cpu.stack_pointer, 0xFA);
    }

    #[test]
    fn test_latest_interrupt_request_wins() {
        let (mut cpu, mut bus) = setup(&[0xEA]);
        bus.set(0xFFFA, 0x06);
        bus.set(0xFFFB, 0x00);
        bus.set(0x0600, 0xEA);
        cpu.trigger_interrupt(Interrupt::IRQ);
        cpu.trigger_interrupt(Interrupt::NMI);

        cpu.tick(&mut bus);
        assert_eq!(cpu.program_counter, 0x0601);
    }

    #[test]
    fn test_power_on_state() {
        let mut bus = SystemBus::test_new();
        let mut cpu = Cpu6502::new();
        bus.set(0xFFFC, 0x04);
        bus.set(0xFFFD, 0x00);
        bus.apu.status = 0xFF;
        bus.apu.frame_counter = 0xFF;

        cpu.power_on(&mut bus);

        assert_eq!(cpu.accumulator, 0);
        assert_eq!(cpu.x_index_reg, 0);
        assert_eq!(cpu.y_index_reg, 0);
        assert_eq!(cpu.stack_pointer, 0xFD);
        assert_eq!(cpu.processor_status.bits(), 0x22);
        assert_eq!(cpu.program_counter, 0x0400);
        assert_eq!(bus.apu.status, 0);
        assert_eq!(bus.apu.frame_counter, 0);
    }

    #[test]
    fn test_reset_state() {
        let mut bus = SystemBus::test_new();
        let mut cpu = Cpu6502::new();
        bus.set(0xFFFC, 0x04);
        bus.set(0xFFFD, 0x00);
        bus.apu.status = 0xFF;

        cpu.reset(&mut bus);

        assert_eq!(cpu.stack_pointer, 0xFA);
        assert!(cpu.get_flag(StatusFlag::INTERRUPT_DISABLE));
        assert_eq!(cpu.program_counter, 0x0400);
        assert_eq!(bus.apu.status, 0);
    }

    #[test]
    fn test_every_opcode_executes() {
        for op in 0..=255u8 {
            let (mut cpu, mut bus) = setup(&[op, 0x10, 0x02]);
            let cycles = cpu.tick(&mut bus);
            assert!((2..=8).contains(&cycles), "opcode {:02X} took {}", op, cycles);
        }
    }

    #[test]
    fn test_program_case_table() {
        let table = r#"[
            { "program": [169, 5, 105, 3],    "ticks": 2, "a": 8,  "x": 0, "p": 32 },
            { "program": [162, 10, 202, 202], "ticks": 3, "a": 0,  "x": 8, "p": 32 },
            { "program": [169, 255, 41, 15],  "ticks": 2, "a": 15, "x": 0, "p": 32 },
            { "program": [169, 128, 10],      "ticks": 2, "a": 0,  "x": 0, "p": 35 },
            { "program": [169, 64, 233, 63],  "ticks": 2, "a": 0,  "x": 0, "p": 35 }
        ]"#;

        let cases: serde_json::Value = serde_json::from_str(table).unwrap();

        for case in cases.as_array().unwrap() {
            let program: Vec<u8> = case["program"]
                .as_array()
                .unwrap()
                .iter()
                .map(|byte| byte.as_u64().unwrap() as u8)
                .collect();

            let (mut cpu, mut bus) = setup(&program);
            for _ in 0..case["ticks"].as_u64().unwrap() {
                cpu.tick(&mut bus);
            }

            assert_eq!(cpu.accumulator as u64, case["a"].as_u64().unwrap(), "{:?}", program);
            assert_eq!(cpu.x_index_reg as u64, case["x"].as_u64().unwrap(), "{:?}", program);
            assert_eq!(cpu.processor_status.bits() as u64, case["p"].as_u64().unwrap(), "{:?}", program);
        }
    }
}
