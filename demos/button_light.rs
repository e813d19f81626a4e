//! Lights the light for 30 s each time the button is pressed.

#![no_std]
#![no_main]

use panic_semihosting as _; // you can put a breakpoint on `rust_begin_unwind` to catch panics
use cortex_m_rt::entry;
use stm32l0_board::config::{BUTTON, LIGHT};
use stm32l0_board::pac::Peripherals as DevicePeripherals;
use stm32l0_board::{OutputType, PinMode, Pull};

// Both are wired active low
const LIGHT_ON: bool = false;
const LIGHT_OFF: bool = true;
const BUTTON_PRESSED: bool = false;

const ON_TIME_MS: u32 = 30_000;

#[entry]
fn main() -> ! {
    // Device defaults to the 2.1 MHz MSI clock

    let cp = cortex_m::Peripherals::take().unwrap();
    let dp = DevicePeripherals::take().unwrap();

    let mut board = stm32l0_board::init(cp.SYST, dp.RCC, dp.GPIOA, dp.GPIOB, dp.GPIOC).unwrap();

    board.set_mode(BUTTON, PinMode::Input(Pull::Up)).unwrap();
    board.set_mode(LIGHT, PinMode::Output(OutputType::PushPull)).unwrap();
    board.write(LIGHT, LIGHT_OFF).unwrap();

    loop {
        while board.read(BUTTON).unwrap() != BUTTON_PRESSED {}
        board.write(LIGHT, LIGHT_ON).unwrap();
        board.delay(ON_TIME_MS);
        board.write(LIGHT, LIGHT_OFF).unwrap();
    }
}
