const KB_PER_GB: f64 = 1024.0 * 1024.0;

/// Resident set size of the current process, in gigabytes. `None` on
/// platforms without a known probe.
#[inline]
pub fn current_rss_gb() -> Option<f64> {
    #[cfg(target_os = "linux")]
    {
        rss_gb_linux()
    }

    #[cfg(target_os = "macos")]
    {
        rss_gb_macos()
    }

    #[cfg(not(any(target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

#[cfg(target_os = "linux")]
fn rss_gb_linux() -> Option<f64> {
    let status = std::fs::read_to_string("/proc/self/status").ok()?;
    resident_kb(&status).map(|kb| kb / KB_PER_GB)
}

/// Pulls the VmRSS amount (reported in kB) out of /proc/self/status text.
#[cfg(target_os = "linux")]
fn resident_kb(status: &str) -> Option<f64> {
    status.lines().find_map(|line| {
        let (key, rest) = line.split_once(':')?;
        if key != "VmRSS" {
            return None;
        }
        rest.split_whitespace()
            .find_map(|token| token.parse::<f64>().ok())
    })
}

#[cfg(target_os = "macos")]
fn rss_gb_macos() -> Option<f64> {
    use mach2::kern_return::KERN_SUCCESS;
    use mach2::message::mach_msg_type_number_t;
    use mach2::task::task_info;
    use mach2::task_info::{mach_task_basic_info, task_info_t, MACH_TASK_BASIC_INFO};
    use mach2::traps::mach_task_self;
    use mach2::vm_types::natural_t;

    let mut count = (std::mem::size_of::<mach_task_basic_info>()
        / std::mem::size_of::<natural_t>()) as mach_msg_type_number_t;
    let mut info: mach_task_basic_info = unsafe { std::mem::zeroed() };
    let kr = unsafe {
        task_info(
            mach_task_self(),
            MACH_TASK_BASIC_INFO,
            &mut info as *mut mach_task_basic_info as task_info_t,
            &mut count,
        )
    };
    if kr != KERN_SUCCESS {
        return None;
    }
    Some(info.resident_size as f64 / (KB_PER_GB * 1024.0))
}
