//! Calculation status LEDs

use embedded_hal::digital::v2::OutputPin;

use crate::errors::*;


/// Two LEDs reporting the PLL calculation outcome.
///
/// `toggle` blinks `ok_led` after a successful calculation and `err_led`
/// after a failed one; the other LED is held off. Timing is up to the caller.
pub struct StatusIndicator<OK, ERR> {
    ok_led: OK,
    err_led: ERR,
    success: bool,
    lit: bool,
}


impl<OK, ERR> StatusIndicator<OK, ERR>
where OK: OutputPin,
      ERR: OutputPin,
{
    /// Creates the indicator for a calculation result, both LEDs off.
    pub fn new<T>(
        ok_led: OK,
        err_led: ERR,
        result: &Result<T, Error>,
    ) -> Result<Self, Error> {
        let mut ind = StatusIndicator {
            ok_led,
            err_led,
            success: result.is_ok(),
            lit: false,
        };
        ind.ok_led.set_low().map_err(|_| Error::Pin)?;
        ind.err_led.set_low().map_err(|_| Error::Pin)?;
        Ok(ind)
    }

    /// True if the calculation this indicator reports succeeded
    #[inline]
    pub fn success(self: &Self) -> bool {
        self.success
    }

    /// Flips the LED matching the outcome.
    pub fn toggle(self: &mut Self) -> Result<(), Error> {
        self.lit = !self.lit;
        let lit = self.lit;
        if self.success {
            set(&mut self.ok_led, lit)
        } else {
            set(&mut self.err_led, lit)
        }
    }

    /// Gives the pins back
    pub fn release(self: Self) -> (OK, ERR) {
        (self.ok_led, self.err_led)
    }
}

#[inline]
fn set<P: OutputPin>(pin: &mut P, high: bool) -> Result<(), Error> {
    if high {
        pin.set_high().map_err(|_| Error::Pin)
    } else {
        pin.set_low().map_err(|_| Error::Pin)
    }
}
