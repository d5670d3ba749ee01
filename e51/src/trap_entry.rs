use core::arch::global_asm;

global_asm!(
    r#"
    .section .text.trap
    .align 4
    .globl __trap_entry
__trap_entry:
    // M-mode only, no stack switch: the frame goes on the interrupted stack
    addi    sp, sp, -144

    // Caller-saved registers; rust_trap preserves the rest
    sd      ra,   0(sp)
    sd      t0,   8(sp)
    sd      t1,  16(sp)
    sd      t2,  24(sp)
    sd      a0,  32(sp)
    sd      a1,  40(sp)
    sd      a2,  48(sp)
    sd      a3,  56(sp)
    sd      a4,  64(sp)
    sd      a5,  72(sp)
    sd      a6,  80(sp)
    sd      a7,  88(sp)
    sd      t3,  96(sp)
    sd      t4, 104(sp)
    sd      t5, 112(sp)
    sd      t6, 120(sp)

    csrr    t0, mepc
    sd      t0, 128(sp)
    csrr    t0, mstatus
    sd      t0, 136(sp)

    // Call Rust handler: rust_trap(&mut TrapFrame)
    mv      a0, sp
    call    rust_trap

    // Restore CSRs from TrapFrame (may be modified by handler)
    ld      t0, 128(sp)
    csrw    mepc, t0
    ld      t0, 136(sp)
    csrw    mstatus, t0

    ld      ra,   0(sp)
    ld      t0,   8(sp)
    ld      t1,  16(sp)
    ld      t2,  24(sp)
    ld      a0,  32(sp)
    ld      a1,  40(sp)
    ld      a2,  48(sp)
    ld      a3,  56(sp)
    ld      a4,  64(sp)
    ld      a5,  72(sp)
    ld      a6,  80(sp)
    ld      a7,  88(sp)
    ld      t3,  96(sp)
    ld      t4, 104(sp)
    ld      t5, 112(sp)
    ld      t6, 120(sp)

    addi    sp, sp, 144
    mret
"#
);
