//! Host-side doubles for the bus, delay, clock and sensor seams.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use std::vec::Vec;

use embedded_hal::i2c::ErrorKind;
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::{ErrorType, I2c, Operation};

use crate::sensors::sensor_task::{Clock, PeriodicSensor};

/// Register-map I2C target with an auto-incrementing register pointer.
pub(crate) struct MockI2c {
    pub address: u8,
    pub regs: [u8; 0x80],
    pub writes: Vec<(u8, u8)>,
    pub fail: bool,
}

impl MockI2c {
    pub fn new(address: u8) -> Self {
        Self {
            address,
            regs: [0; 0x80],
            writes: Vec::new(),
            fail: false,
        }
    }
}

impl ErrorType for MockI2c {
    type Error = ErrorKind;
}

impl I2c for MockI2c {
    async fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        if self.fail || address != self.address {
            return Err(ErrorKind::Bus);
        }

        let mut pointer = 0usize;
        for operation in operations.iter_mut() {
            match operation {
                Operation::Write(bytes) => {
                    if let Some((&reg, data)) = bytes.split_first() {
                        pointer = reg as usize;
                        for &byte in data {
                            self.regs[pointer] = byte;
                            self.writes.push((pointer as u8, byte));
                            pointer += 1;
                        }
                    }
                }
                Operation::Read(buf) => {
                    for byte in buf.iter_mut() {
                        *byte = self.regs[pointer];
                        pointer += 1;
                    }
                }
            }
        }
        Ok(())
    }
}

/// Records every requested delay in milliseconds. With `yield_each` set,
/// each delay returns `Pending` once so a polled loop hands control back.
#[derive(Clone, Default)]
pub(crate) struct MockDelay {
    pub calls: Rc<RefCell<Vec<u32>>>,
    pub yield_each: bool,
}

impl MockDelay {
    pub fn yielding() -> Self {
        Self {
            yield_each: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<u32> {
        self.calls.borrow().clone()
    }
}

impl DelayNs for MockDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.delay_ms(ns.div_ceil(1_000_000)).await;
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.calls.borrow_mut().push(ms);
        if self.yield_each {
            embassy_futures::yield_now().await;
        }
    }
}

/// Returns the current time, then advances it by `step`.
#[derive(Clone)]
pub(crate) struct StepClock {
    pub now: Rc<Cell<u32>>,
    pub step: u32,
}

impl StepClock {
    pub fn starting_at(now: u32, step: u32) -> Self {
        Self {
            now: Rc::new(Cell::new(now)),
            step,
        }
    }
}

impl Clock for StepClock {
    fn now_ms(&self) -> u32 {
        let now = self.now.get();
        self.now.set(now.wrapping_add(self.step));
        now
    }
}

/// Sensor whose init result and reads are scripted up front. Once the script
/// runs out every read reports no data.
pub(crate) struct ScriptedSensor<R> {
    pub init_ok: bool,
    pub script: VecDeque<Result<Option<R>, ()>>,
    pub inits: Rc<Cell<u32>>,
    pub reads: Rc<Cell<u32>>,
}

impl<R> ScriptedSensor<R> {
    pub fn new(init_ok: bool) -> Self {
        Self {
            init_ok,
            script: VecDeque::new(),
            inits: Rc::new(Cell::new(0)),
            reads: Rc::new(Cell::new(0)),
        }
    }

    pub fn then(mut self, read: Result<Option<R>, ()>) -> Self {
        self.script.push_back(read);
        self
    }
}

impl<R> PeriodicSensor for ScriptedSensor<R> {
    type Reading = R;
    type Error = ();

    async fn init(&mut self) -> Result<(), ()> {
        self.inits.set(self.inits.get() + 1);
        if self.init_ok { Ok(()) } else { Err(()) }
    }

    async fn read(&mut self) -> Result<Option<R>, ()> {
        self.reads.set(self.reads.get() + 1);
        self.script.pop_front().unwrap_or(Ok(None))
    }
}
