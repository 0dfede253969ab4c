// RECORDER IDENTITY
// EXPLICIT OVERRIDE WINS; OTHERWISE THE HOST NAME, QUERIED ONCE AT START AND
// NEVER RE-QUERIED. UNDER THE ORCHESTRATOR THE HOST NAME IS THE POD NAME, SO
// THE DEFAULT PARTITIONS THE SHARED DIRECTORY ON ITS OWN.

use anyhow::{Context, Result};

pub fn resolve(explicit: Option<String>) -> Result<String> {
    match explicit {
        Some(name) => Ok(name),
        None => host_name().context("could not query host name"),
    }
}

fn host_name() -> Result<String> {
    let mut buf = [0u8; 256];
    let rc = unsafe { libc::gethostname(buf.as_mut_ptr() as *mut libc::c_char, buf.len()) };
    if rc != 0 {
        return Err(std::io::Error::last_os_error().into());
    }
    let len = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
    Ok(String::from_utf8_lossy(&buf[..len]).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_override_wins() {
        let name = resolve(Some("timing-3".to_string())).unwrap();
        assert_eq!(name, "timing-3");
    }

    #[test]
    fn falls_back_to_host_name() {
        let name = resolve(None).unwrap();
        assert!(!name.is_empty());
    }

    #[test]
    fn host_name_has_no_trailing_nul() {
        let name = host_name().unwrap();
        assert!(!name.contains('\0'));
    }
}
