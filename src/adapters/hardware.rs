//! ESP32 hardware adapter: ADC oneshot reads, the DHT11 one-wire
//! protocol, GPIO input configuration, and the edge-interrupt service.
//!
//! Everything here talks to ESP-IDF through raw sys calls and is the only
//! code in the crate that does. `init_peripherals()` and
//! `init_isr_service()` run once from `main()` before any task spawns;
//! the ISR trampolines registered here do nothing but raise the matching
//! [`EdgeSignal`](crate::signal::EdgeSignal).

use esp_idf_sys::*;
use log::info;

use crate::app::ports::{ClimateSample, SensorPort};
use crate::error::SensorError;
use crate::pins;
use crate::signal::{BUTTON_EDGE, PROXIMITY_EDGE};

// ── One-shot init ─────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    AdcInitFailed(i32),
    GpioConfigFailed(i32),
    IsrInstallFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::AdcInitFailed(rc) => write!(f, "ADC1 init failed (rc={rc})"),
            Self::GpioConfigFailed(rc) => write!(f, "GPIO config failed (rc={rc})"),
            Self::IsrInstallFailed(rc) => write!(f, "GPIO ISR service install failed (rc={rc})"),
        }
    }
}

impl core::error::Error for HwInitError {}

pub fn init_peripherals() -> Result<(), HwInitError> {
    // SAFETY: called once from main() before any task spawns; single-threaded.
    unsafe {
        init_adc()?;
        init_gpio_inputs()?;
        init_dht_line()?;
    }
    info!("hw_init: all peripherals configured");
    Ok(())
}

// ── ADC (oneshot) ─────────────────────────────────────────────

static mut ADC1_HANDLE: adc_oneshot_unit_handle_t = core::ptr::null_mut();

/// SAFETY: written once by `init_adc()` before the acquisition task exists;
/// afterwards only the acquisition task reads through it.
unsafe fn adc1_handle() -> adc_oneshot_unit_handle_t {
    unsafe { ADC1_HANDLE }
}

unsafe fn init_adc() -> Result<(), HwInitError> {
    let init_cfg = adc_oneshot_unit_init_cfg_t {
        unit_id: adc_unit_t_ADC_UNIT_1,
        ulp_mode: adc_ulp_mode_t_ADC_ULP_MODE_DISABLE,
        ..Default::default()
    };
    // SAFETY: ADC1_HANDLE is only written here, once at boot.
    let ret = unsafe { adc_oneshot_new_unit(&init_cfg, &raw mut ADC1_HANDLE) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::AdcInitFailed(ret));
    }

    let chan_cfg = adc_oneshot_chan_cfg_t {
        atten: adc_atten_t_ADC_ATTEN_DB_12,
        bitwidth: adc_bitwidth_t_ADC_BITWIDTH_12,
    };

    for channel in [pins::GAS_ADC_CHANNEL, pins::LIGHT_ADC_CHANNEL] {
        let ret = unsafe { adc_oneshot_config_channel(adc1_handle(), channel, &chan_cfg) };
        if ret != ESP_OK as i32 {
            return Err(HwInitError::AdcInitFailed(ret));
        }
    }

    info!("hw_init: ADC1 configured (CH6=MQ135, CH4=light)");
    Ok(())
}

pub fn adc1_read(channel: u32) -> Result<u16, SensorError> {
    let mut raw: i32 = 0;
    // SAFETY: adc1_handle() contract — acquisition-task access only.
    let ret = unsafe { adc_oneshot_read(adc1_handle(), channel, &mut raw) };
    if ret != ESP_OK as i32 {
        return Err(SensorError::AdcReadFailed);
    }
    Ok(raw.clamp(0, i32::from(pins::ADC_FULL_SCALE)) as u16)
}

// ── GPIO inputs ───────────────────────────────────────────────

unsafe fn init_gpio_inputs() -> Result<(), HwInitError> {
    // Button: active-low momentary switch, falling edge only.
    let btn_cfg = gpio_config_t {
        pin_bit_mask: 1u64 << pins::BUTTON_GPIO,
        mode: gpio_mode_t_GPIO_MODE_INPUT,
        pull_up_en: gpio_pullup_t_GPIO_PULLUP_ENABLE,
        pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
        intr_type: gpio_int_type_t_GPIO_INTR_NEGEDGE,
    };
    let ret = unsafe { gpio_config(&btn_cfg) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::GpioConfigFailed(ret));
    }

    // LJ12A3 proximity detector: active-low, interrupts on both edges so
    // detection and release both wake the consumer.
    let prox_cfg = gpio_config_t {
        pin_bit_mask: 1u64 << pins::PROXIMITY_GPIO,
        mode: gpio_mode_t_GPIO_MODE_INPUT,
        pull_up_en: gpio_pullup_t_GPIO_PULLUP_ENABLE,
        pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
        intr_type: gpio_int_type_t_GPIO_INTR_ANYEDGE,
    };
    let ret = unsafe { gpio_config(&prox_cfg) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::GpioConfigFailed(ret));
    }

    info!("hw_init: GPIO inputs configured");
    Ok(())
}

/// Current level of the proximity line, active-low resolved.
pub fn proximity_detected() -> bool {
    // SAFETY: gpio_get_level is a read-only register access on an
    // already-configured input pin.
    (unsafe { gpio_get_level(pins::PROXIMITY_GPIO) }) == 0
}

// ── GPIO ISR service ──────────────────────────────────────────

unsafe extern "C" fn button_gpio_isr(_arg: *mut core::ffi::c_void) {
    BUTTON_EDGE.raise_from_isr();
}

unsafe extern "C" fn proximity_gpio_isr(_arg: *mut core::ffi::c_void) {
    PROXIMITY_EDGE.raise_from_isr();
}

/// Install the per-pin GPIO ISR service and register the edge handlers.
/// Call after `init_peripherals()` and before spawning the consumers.
pub fn init_isr_service() -> Result<(), HwInitError> {
    // SAFETY: gpio_install_isr_service is idempotent; ESP_ERR_INVALID_STATE
    // means it was already installed (acceptable). The handlers registered
    // below only perform a lock-free atomic store.
    unsafe {
        let ret = gpio_install_isr_service(0);
        if ret != ESP_OK && ret != ESP_ERR_INVALID_STATE {
            return Err(HwInitError::IsrInstallFailed(ret));
        }

        gpio_isr_handler_add(
            pins::BUTTON_GPIO,
            Some(button_gpio_isr),
            core::ptr::null_mut(),
        );
        gpio_intr_enable(pins::BUTTON_GPIO);

        gpio_isr_handler_add(
            pins::PROXIMITY_GPIO,
            Some(proximity_gpio_isr),
            core::ptr::null_mut(),
        );
        gpio_intr_enable(pins::PROXIMITY_GPIO);

        info!("hw_init: ISR service installed (button, proximity)");
    }
    Ok(())
}

// ── DHT11 one-wire ────────────────────────────────────────────

unsafe fn init_dht_line() -> Result<(), HwInitError> {
    // Idle state is high via the pull-up; the read sequence drives it low.
    let cfg = gpio_config_t {
        pin_bit_mask: 1u64 << pins::DHT_GPIO,
        mode: gpio_mode_t_GPIO_MODE_OUTPUT_OD,
        pull_up_en: gpio_pullup_t_GPIO_PULLUP_ENABLE,
        pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
        intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
    };
    let ret = unsafe { gpio_config(&cfg) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::GpioConfigFailed(ret));
    }
    unsafe { gpio_set_level(pins::DHT_GPIO, 1) };
    Ok(())
}

/// Busy-wait until the line reads `level`, bounded by `timeout_us`.
/// Returns the time spent waiting, or `None` on timeout.
unsafe fn wait_for_level(level: bool, timeout_us: i64) -> Option<i64> {
    // SAFETY: esp_timer_get_time and gpio_get_level are register reads.
    unsafe {
        let start = esp_timer_get_time();
        loop {
            if (gpio_get_level(pins::DHT_GPIO) != 0) == level {
                return Some(esp_timer_get_time() - start);
            }
            if esp_timer_get_time() - start > timeout_us {
                return None;
            }
        }
    }
}

/// One DHT11 transaction: 18 ms start pulse, 80/80 µs handshake, then
/// 40 data bits where a long high phase (> 40 µs) encodes a 1.
///
/// Timing-critical: the whole bit phase runs inside a FreeRTOS critical
/// section so a preemption cannot stretch a pulse measurement.
fn dht_read() -> Result<ClimateSample, SensorError> {
    let mut bytes = [0u8; 5];

    // SAFETY: the DHT line was configured open-drain in init_dht_line();
    // only the acquisition task calls this.
    let ok = unsafe {
        gpio_set_level(pins::DHT_GPIO, 0);
        esp_rom_delay_us(18_000);
        gpio_set_level(pins::DHT_GPIO, 1);
        esp_rom_delay_us(30);

        let mut mux: portMUX_TYPE = portMUX_TYPE {
            owner: portMUX_FREE_VAL,
            count: 0,
        };
        vPortEnterCritical(&raw mut mux);

        let ok = 'proto: {
            // Sensor response: ~80 µs low then ~80 µs high.
            if wait_for_level(false, 100).is_none() {
                break 'proto false;
            }
            if wait_for_level(true, 100).is_none() {
                break 'proto false;
            }
            if wait_for_level(false, 100).is_none() {
                break 'proto false;
            }

            for bit in 0..40 {
                // 50 µs low preamble, then 26-28 µs high = 0 / 70 µs high = 1.
                if wait_for_level(true, 80).is_none() {
                    break 'proto false;
                }
                let Some(high_us) = wait_for_level(false, 100) else {
                    break 'proto false;
                };
                if high_us > 40 {
                    bytes[bit / 8] |= 0x80 >> (bit % 8);
                }
            }
            true
        };

        vPortExitCritical(&raw mut mux);
        gpio_set_level(pins::DHT_GPIO, 1);
        ok
    };

    if !ok {
        return Err(SensorError::ClimateReadFailed);
    }

    let checksum = bytes[0]
        .wrapping_add(bytes[1])
        .wrapping_add(bytes[2])
        .wrapping_add(bytes[3]);
    if checksum != bytes[4] {
        return Err(SensorError::ClimateReadFailed);
    }

    Ok(ClimateSample {
        humidity_tenths: i16::from(bytes[0]) * 10 + i16::from(bytes[1]),
        temperature_tenths: i16::from(bytes[2]) * 10 + i16::from(bytes[3]),
    })
}

// ── Sensor port ───────────────────────────────────────────────

/// Production [`SensorPort`] backed by the board peripherals.
pub struct EspSensorPort;

impl EspSensorPort {
    pub fn new() -> Self {
        Self
    }
}

impl Default for EspSensorPort {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorPort for EspSensorPort {
    fn read_climate(&mut self) -> Result<ClimateSample, SensorError> {
        dht_read()
    }

    fn read_gas_raw(&mut self) -> Result<u16, SensorError> {
        adc1_read(pins::GAS_ADC_CHANNEL)
    }

    fn read_light_raw(&mut self) -> Result<u16, SensorError> {
        adc1_read(pins::LIGHT_ADC_CHANNEL)
    }
}
