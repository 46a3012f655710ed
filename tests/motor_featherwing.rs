#![allow(missing_docs)]
//! Host-level tests for the DC motor + stepper wing.

mod common;

use common::MockPca9685;
use featherwing_kit::Error;
use featherwing_kit::motor_featherwing::{
    DUTY_FULL, Direction, FREQUENCY_HZ, Motor, MotorFeatherWing, StepStyle, Stepper,
};

fn wing() -> MotorFeatherWing<MockPca9685> {
    MotorFeatherWing::new(MockPca9685::default()).unwrap()
}

/// Duty of channels `a1, a2, b1, b2` of stepper 1.
fn s1_coils(pca9685: &MockPca9685) -> [u16; 4] {
    [10, 9, 11, 12].map(|channel| pca9685.duty[channel])
}

#[test]
fn construction_sets_the_pwm_frequency() {
    let pca9685 = wing().into_inner();
    assert_eq!(pca9685.frequency, Some(FREQUENCY_HZ));
    assert!(pca9685.writes.is_empty());
}

#[test]
fn first_use_of_a_motor_enables_its_pwm_channel() {
    let mut wing = wing();
    wing.motor(Motor::M2).unwrap();
    wing.motor(Motor::M2).unwrap();

    let pca9685 = wing.into_inner();
    assert_eq!(pca9685.writes, [(13, DUTY_FULL)]);
}

#[test]
fn throttle_drives_the_h_bridge_inputs() {
    let mut wing = wing();
    let mut motor = wing.motor(Motor::M1).unwrap();
    assert_eq!(motor.throttle(), None);

    motor.set_throttle(Some(1.0)).unwrap();
    assert_eq!(motor.throttle(), Some(1.0));
    let pca9685 = wing.into_inner();
    assert_eq!((pca9685.duty[9], pca9685.duty[10]), (DUTY_FULL, 0));

    let mut wing = MotorFeatherWing::new(pca9685).unwrap();
    let mut motor = wing.motor(Motor::M1).unwrap();
    motor.set_throttle(Some(0.5)).unwrap();
    let pca9685 = wing.into_inner();
    assert_eq!((pca9685.duty[9], pca9685.duty[10]), (32767, 0));
}

#[test]
fn reverse_brake_and_coast() {
    let mut wing = wing();
    wing.motor(Motor::M4)
        .unwrap()
        .set_throttle(Some(-0.25))
        .unwrap();
    let (_, in1, in2) = Motor::M4.channels();

    let pca9685 = wing.into_inner();
    assert_eq!(
        (pca9685.duty[usize::from(in1)], pca9685.duty[usize::from(in2)]),
        (0, 16383)
    );

    let mut wing = MotorFeatherWing::new(pca9685).unwrap();
    wing.motor(Motor::M4).unwrap().set_throttle(Some(0.0)).unwrap();
    let pca9685 = wing.into_inner();
    assert_eq!(
        (pca9685.duty[usize::from(in1)], pca9685.duty[usize::from(in2)]),
        (DUTY_FULL, DUTY_FULL)
    );

    let mut wing = MotorFeatherWing::new(pca9685).unwrap();
    wing.motor(Motor::M4).unwrap().set_throttle(None).unwrap();
    let pca9685 = wing.into_inner();
    assert_eq!(
        (pca9685.duty[usize::from(in1)], pca9685.duty[usize::from(in2)]),
        (0, 0)
    );
}

#[test]
fn throttle_outside_unit_range_is_rejected() {
    let mut wing = wing();
    let mut motor = wing.motor(Motor::M3).unwrap();
    motor.set_throttle(Some(0.3)).unwrap();

    assert_eq!(motor.set_throttle(Some(1.01)), Err(Error::ThrottleOutOfRange));
    assert_eq!(motor.set_throttle(Some(-2.0)), Err(Error::ThrottleOutOfRange));
    assert_eq!(motor.set_throttle(Some(f32::NAN)), Err(Error::ThrottleOutOfRange));
    assert_eq!(motor.throttle(), Some(0.3));
}

#[test]
fn motors_and_steppers_sharing_channels_conflict() {
    let mut wing = wing();
    wing.motor(Motor::M1).unwrap();
    assert!(matches!(wing.stepper(Stepper::S1), Err(Error::MotorInUse)));

    wing.stepper(Stepper::S2).unwrap();
    assert!(matches!(wing.motor(Motor::M3), Err(Error::MotorInUse)));
    assert!(matches!(wing.motor(Motor::M4), Err(Error::MotorInUse)));

    wing.motor(Motor::M2).unwrap();
}

#[test]
fn stepper_enables_both_bridges_and_energizes_the_first_coil() {
    let mut wing = wing();
    wing.stepper(Stepper::S1).unwrap();

    let pca9685 = wing.into_inner();
    assert_eq!(pca9685.duty[8], DUTY_FULL);
    assert_eq!(pca9685.duty[13], DUTY_FULL);
    assert_eq!(s1_coils(&pca9685), [DUTY_FULL, 0, 0, 0]);
}

#[test]
fn single_and_double_steps_walk_the_coil_sequence() {
    let mut wing = wing();
    let mut stepper = wing.stepper(Stepper::S1).unwrap();

    stepper.onestep(Direction::Forward, StepStyle::Single).unwrap();
    assert_eq!(stepper.half_step(), 2);

    stepper.onestep(Direction::Forward, StepStyle::Double).unwrap();
    assert_eq!(stepper.half_step(), 3);

    stepper.onestep(Direction::Forward, StepStyle::Double).unwrap();
    assert_eq!(stepper.half_step(), 5);

    let pca9685 = wing.into_inner();
    // Half step 5 energizes a2 and b2.
    assert_eq!(s1_coils(&pca9685), [0, DUTY_FULL, 0, DUTY_FULL]);
}

#[test]
fn stepping_backward_and_wrapping() {
    let mut wing = wing();
    let mut stepper = wing.stepper(Stepper::S1).unwrap();
    stepper.onestep(Direction::Backward, StepStyle::Single).unwrap();
    assert_eq!(stepper.half_step(), 6);

    stepper.onestep(Direction::Backward, StepStyle::Double).unwrap();
    assert_eq!(stepper.half_step(), 5);

    stepper.onestep(Direction::Backward, StepStyle::Single).unwrap();
    assert_eq!(stepper.half_step(), 4);

    for _ in 0..4 {
        stepper.onestep(Direction::Forward, StepStyle::Single).unwrap();
    }
    assert_eq!(stepper.half_step(), 4);
}

#[test]
fn step_position_survives_between_handles() {
    let mut wing = wing();
    wing.stepper(Stepper::S2)
        .unwrap()
        .onestep(Direction::Forward, StepStyle::Single)
        .unwrap();
    assert_eq!(wing.stepper(Stepper::S2).unwrap().half_step(), 2);
}

#[test]
fn release_turns_every_coil_off() {
    let mut wing = wing();
    let mut stepper = wing.stepper(Stepper::S1).unwrap();
    stepper.onestep(Direction::Forward, StepStyle::Double).unwrap();
    stepper.release().unwrap();

    let pca9685 = wing.into_inner();
    assert_eq!(s1_coils(&pca9685), [0; 4]);
}
