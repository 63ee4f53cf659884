use evdev::uinput::{VirtualDevice, VirtualDeviceBuilder};
use evdev::{AbsInfo, AbsoluteAxisType, AttributeSet, Key, RelativeAxisType, UinputAbsSetup};
use std::thread;
use std::time::Duration;

use crate::error::Result;
use crate::mouse::MouseButton;
use crate::ScreenSize;

/// Creates an absolute pointer device spanning the whole screen
///
/// Absolute axes map 1:1 onto screen pixels so that drags are not subject
/// to pointer acceleration. The wheel axes are registered for zooming.
pub fn create_device(screen: ScreenSize) -> Result<VirtualDevice> {
    let mut keys = AttributeSet::<Key>::new();
    for button in MouseButton::ALL {
        keys.insert(button.to_key());
    }

    let mut rel_axes = AttributeSet::<RelativeAxisType>::new();
    rel_axes.insert(RelativeAxisType::REL_WHEEL);
    rel_axes.insert(RelativeAxisType::REL_HWHEEL);

    let abs_x = UinputAbsSetup::new(
        AbsoluteAxisType::ABS_X,
        AbsInfo::new(0, 0, axis_max(screen.width), 0, 0, 0),
    );
    let abs_y = UinputAbsSetup::new(
        AbsoluteAxisType::ABS_Y,
        AbsInfo::new(0, 0, axis_max(screen.height), 0, 0, 0),
    );

    let device = VirtualDeviceBuilder::new()?
        .name("mapgrab virtual pointer")
        .with_keys(&keys)?
        .with_relative_axes(&rel_axes)?
        .with_absolute_axis(&abs_x)?
        .with_absolute_axis(&abs_y)?
        .build()?;

    // Wait for the kernel to fully recognize the device
    // Without this delay, initial events may be lost
    thread::sleep(Duration::from_secs(1));

    Ok(device)
}

fn axis_max(extent: u32) -> i32 {
    i32::try_from(extent.saturating_sub(1)).unwrap_or(i32::MAX)
}
