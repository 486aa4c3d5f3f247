//! Robot driver slot.
//!
//! Hardware control lives behind [`RobotDriver`]; applications talk to it
//! through a [`Robot`] slot that stays empty until [`Robot::start`] and
//! clamps every input to the range the hardware accepts. Nothing in the
//! menu code depends on this module.

use log::{debug, info};

use crate::error::{DriverError, DriverResult};

pub const SPEED_LIMIT: i16 = 100;
pub const TURN_RATIO_LIMIT: i16 = 200;
pub const DRIFT_LIMIT: i8 = 25;
pub const RADIO_GROUP_MIN: u8 = 1;
pub const RADIO_GROUP_MAX: u8 = 32;

/// State of the line-following sensors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineState {
    #[default]
    None,
    Left,
    Right,
    Both,
    LostLeft,
    LostRight,
}

/// Hardware operations a robot must provide.
///
/// Values passed in are already clamped by [`Robot`].
pub trait RobotDriver {
    /// `turn_ratio` in [-200, 200], `speed` in percent [-100, 100]
    fn motor_run(&mut self, turn_ratio: i16, speed: i16);

    fn motor_stop(&mut self);

    /// Last distance reported by the ultrasonic sensor, in cm
    fn ultrasonic_distance(&self) -> u16;

    fn line_state(&self) -> LineState;

    fn set_line_assist(&mut self, enabled: bool);

    /// Power correction between the left and right motors
    fn set_run_drift(&mut self, drift: i8);

    fn set_radio_group(&mut self, group: u8);
}

/// Slot holding the active driver, if any.
#[derive(Debug)]
pub struct Robot<D: RobotDriver> {
    driver: Option<D>,
}

impl<D: RobotDriver> Default for Robot<D> {
    fn default() -> Self {
        Self { driver: None }
    }
}

impl<D: RobotDriver> Robot<D> {
    pub const fn new() -> Self {
        Self { driver: None }
    }

    pub fn start(&mut self, driver: D) {
        info!("Robot driver started");
        self.driver = Some(driver);
    }

    /// Remove and return the driver.
    pub fn stop(&mut self) -> Option<D> {
        let driver = self.driver.take();
        if driver.is_some() {
            info!("Robot driver stopped");
        }
        driver
    }

    pub fn is_started(&self) -> bool {
        self.driver.is_some()
    }

    fn driver(&self) -> DriverResult<&D> {
        self.driver.as_ref().ok_or(DriverError::NotInitialized)
    }

    fn driver_mut(&mut self) -> DriverResult<&mut D> {
        self.driver.as_mut().ok_or(DriverError::NotInitialized)
    }

    pub fn motor_run(&mut self, turn_ratio: i16, speed: i16) -> DriverResult<()> {
        let turn_ratio = turn_ratio.clamp(-TURN_RATIO_LIMIT, TURN_RATIO_LIMIT);
        let speed = speed.clamp(-SPEED_LIMIT, SPEED_LIMIT);
        debug!("motor_run turn={} speed={}", turn_ratio, speed);
        self.driver_mut()?.motor_run(turn_ratio, speed);
        Ok(())
    }

    pub fn motor_stop(&mut self) -> DriverResult<()> {
        self.driver_mut()?.motor_stop();
        Ok(())
    }

    pub fn obstacle_distance(&self) -> DriverResult<u16> {
        Ok(self.driver()?.ultrasonic_distance())
    }

    /// Whether the line sensors currently report `state`.
    pub fn detect_lines(&self, state: LineState) -> DriverResult<bool> {
        Ok(self.driver()?.line_state() == state)
    }

    pub fn set_line_assist(&mut self, enabled: bool) -> DriverResult<()> {
        self.driver_mut()?.set_line_assist(enabled);
        Ok(())
    }

    pub fn set_motor_drift(&mut self, drift: i16) -> DriverResult<()> {
        let drift = drift.clamp(-i16::from(DRIFT_LIMIT), i16::from(DRIFT_LIMIT)) as i8;
        self.driver_mut()?.set_run_drift(drift);
        Ok(())
    }

    pub fn set_radio_group(&mut self, group: u8) -> DriverResult<()> {
        let group = group.clamp(RADIO_GROUP_MIN, RADIO_GROUP_MAX);
        self.driver_mut()?.set_radio_group(group);
        Ok(())
    }
}
