//! Check sensor availability.

use tiltdrift_sensor_feed::backends::IioBackend;

pub fn run() -> anyhow::Result<()> {
    println!("TiltDrift Sensor Check");
    println!("{}", "=".repeat(50));

    match IioBackend::probe() {
        Some(device) => println!("[OK] IIO accelerometer: {}", device.display()),
        None => println!("[WARN] IIO accelerometer: none found under /sys/bus/iio/devices"),
    }

    println!("[OK] Synthetic backend: always available");

    println!();
    if IioBackend::is_supported() {
        println!("Hardware tilt input is available. `tiltdrift run` will use it.");
    } else {
        println!("No accelerometer hardware. `tiltdrift run` will fall back to synthetic tilt.");
    }

    Ok(())
}
