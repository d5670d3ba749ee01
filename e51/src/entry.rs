use core::arch::global_asm;

global_asm!(
    r#"
    .section .text.entry
    .globl _start
_start:
    /* Interrupts off until the trap vector is installed */
    csrw mie, zero
    csrci mstatus, 0x8

    .option push
    .option norelax
    la   gp, __global_pointer$
    .option pop

    /* Only the E51 (hart 0) runs this image; U54s wait for a later stage */
    csrr t0, mhartid
    bnez t0, 4f

    la   sp, _stack_top

    /* Copy .data from ENVM to LIM */
    la   t0, __data_load
    la   t1, __data_start
    la   t2, __data_end
1:
    bgeu t1, t2, 2f
    ld   t3, 0(t0)
    sd   t3, 0(t1)
    addi t0, t0, 8
    addi t1, t1, 8
    j    1b
2:
    /* Zero .bss */
    la   t0, __bss_start
    la   t1, __bss_end
3:
    bgeu t0, t1, 5f
    sd   zero, 0(t0)
    addi t0, t0, 8
    j    3b
4:
    wfi
    j    4b
5:
    /* Jump to Rust */
    la   t0, rust_start
    jr   t0
"#
);
