use crate::cpu::tests::cpu_for_testing;
use crate::cpu::AddressingMode::*;
use crate::cpu::{MemoryBus, Operand};

#[test]
fn test_addressing_modes() {
    let (mut cpu, mut memory) = cpu_for_testing();
    cpu.program_counter = 0x8000;

    /* Immediate: the operand is the byte after the opcode */
    assert_eq!(Immediate.resolve(&cpu, &mut memory, 0x12, 0).address, 0x8001);

    /* ZeroPage */
    assert_eq!(ZeroPage.resolve(&cpu, &mut memory, 0xab, 0).address, 0x00ab);

    /* ZeroPageX, ZeroPageY: stay in zero page */
    cpu.index_x = 0x10;
    cpu.index_y = 0x20;
    assert_eq!(ZeroPageX.resolve(&cpu, &mut memory, 0x05, 0).address, 0x0015);
    assert_eq!(ZeroPageX.resolve(&cpu, &mut memory, 0xf5, 0).address, 0x0005); // wraps
    assert_eq!(ZeroPageY.resolve(&cpu, &mut memory, 0xf0, 0).address, 0x0010); // wraps

    /* Relative: from the end of the two-byte branch */
    assert_eq!(Relative.resolve(&cpu, &mut memory, 0x10, 0).address, 0x8012);
    assert_eq!(Relative.resolve(&cpu, &mut memory, 0xfe, 0).address, 0x8000); // -2: itself

    /* Absolute */
    assert_eq!(Absolute.resolve(&cpu, &mut memory, 0xcd, 0xab).address, 0xabcd);

    /* AbsoluteX, AbsoluteY: can cross pages, and report it */
    assert_eq!(
        AbsoluteX.resolve(&cpu, &mut memory, 0x00, 0x20),
        Operand {
            address: 0x2010,
            page_crossed: false
        }
    );
    assert_eq!(
        AbsoluteY.resolve(&cpu, &mut memory, 0xf0, 0x20),
        Operand {
            address: 0x2110,
            page_crossed: true
        }
    );
    cpu.index_x = 0x01;
    assert_eq!(AbsoluteX.resolve(&cpu, &mut memory, 0xff, 0xff).address, 0x0000); // wraps memory

    /* Indirect: ordinary pointer */
    memory.write(0x0120, 0x34);
    memory.write(0x0121, 0x12);
    assert_eq!(Indirect.resolve(&cpu, &mut memory, 0x20, 0x01).address, 0x1234);

    /* Indirect: pointer at the end of a page takes its high byte from the start of that page */
    memory.write(0x30ff, 0x80);
    memory.write(0x3000, 0x90);
    memory.write(0x3100, 0x40);
    assert_eq!(Indirect.resolve(&cpu, &mut memory, 0xff, 0x30).address, 0x9080);

    /* IndirectX: pointer in zero page after adding X, wrapping within zero page */
    cpu.index_x = 0x04;
    memory.write(0x0024, 0x74);
    memory.write(0x0025, 0x20);
    assert_eq!(IndirectX.resolve(&cpu, &mut memory, 0x20, 0).address, 0x2074);
    memory.write(0x00ff, 0x11);
    memory.write(0x0000, 0x22);
    memory.write(0x0100, 0x33);
    assert_eq!(IndirectX.resolve(&cpu, &mut memory, 0xfb, 0).address, 0x2211);

    /* IndirectY: zero page pointer first, then Y added to the full address */
    cpu.index_y = 0x30;
    memory.write(0x0086, 0x28);
    memory.write(0x0087, 0x40);
    assert_eq!(
        IndirectY.resolve(&cpu, &mut memory, 0x86, 0),
        Operand {
            address: 0x4058,
            page_crossed: false
        }
    );
    /* the pointer itself wraps in zero page; the add carries into the next page */
    memory.write(0x00ff, 0xf0);
    memory.write(0x0000, 0x33);
    assert_eq!(
        IndirectY.resolve(&cpu, &mut memory, 0xff, 0),
        Operand {
            address: 0x3420,
            page_crossed: true
        }
    );
}

#[test]
fn test_deref_and_write() {
    let (mut cpu, mut memory) = cpu_for_testing();

    /* Accumulator reads and writes A */
    cpu.accumulator = 0x50;
    let none = Operand::default();
    assert_eq!(Accumulator.deref(&cpu, &mut memory, &none), 0x50);
    Accumulator.write(&mut cpu, &mut memory, &none, 0x51);
    assert_eq!(cpu.accumulator, 0x51);

    /* nothing special for accumulator using the boundary cross check */
    let mut extra_cycles = 0;
    assert_eq!(
        Accumulator.deref_check_boundary_cross(&cpu, &mut memory, &none, &mut extra_cycles),
        0x51
    );
    assert_eq!(extra_cycles, 0);

    /* memory modes go through the bus */
    let crossed = Operand {
        address: 0x0210,
        page_crossed: true,
    };
    AbsoluteX.write(&mut cpu, &mut memory, &crossed, 0x99);
    assert_eq!(memory.read(0x0210), 0x99);
    assert_eq!(
        AbsoluteX.deref_check_boundary_cross(&cpu, &mut memory, &crossed, &mut extra_cycles),
        0x99
    );
    assert_eq!(extra_cycles, 1); // crossing costs a cycle
}

#[test]
fn test_addressing_modes_bytes_used() {
    /* how many bytes used by op codes using these addressing modes */
    assert_eq!(Implicit.get_bytes(), 1);
    assert_eq!(Accumulator.get_bytes(), 1);
    assert_eq!(Immediate.get_bytes(), 2);
    assert_eq!(ZeroPage.get_bytes(), 2);
    assert_eq!(ZeroPageX.get_bytes(), 2);
    assert_eq!(ZeroPageY.get_bytes(), 2);
    assert_eq!(Relative.get_bytes(), 2);
    assert_eq!(Absolute.get_bytes(), 3);
    assert_eq!(AbsoluteX.get_bytes(), 3);
    assert_eq!(AbsoluteY.get_bytes(), 3);
    assert_eq!(Indirect.get_bytes(), 3);
    assert_eq!(IndirectX.get_bytes(), 2);
    assert_eq!(IndirectY.get_bytes(), 2);
}
