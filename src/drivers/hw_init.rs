//! One-shot hardware peripheral initialization.
//!
//! Configures the relay GPIO, the sensor ADC channel, and the host-link
//! UART using raw ESP-IDF sys calls. Called once from `main()` before the
//! event loop starts.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: writes real registers.
//! On host/test: GPIO writes are recorded per thread and ADC reads come
//! from an injectable value, so drivers can be exercised without hardware.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

#[cfg(target_os = "espidf")]
use crate::pins;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    AdcInitFailed(i32),
    GpioConfigFailed(i32),
    UartInitFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::AdcInitFailed(rc)    => write!(f, "ADC1 init failed (rc={})", rc),
            Self::GpioConfigFailed(rc) => write!(f, "GPIO config failed (rc={})", rc),
            Self::UartInitFailed(rc)   => write!(f, "UART init failed (rc={})", rc),
        }
    }
}

impl std::error::Error for HwInitError {}

#[cfg(target_os = "espidf")]
pub fn init_peripherals() -> Result<(), HwInitError> {
    // SAFETY: Called once from main() before event loop; single-threaded.
    unsafe {
        init_relay_output()?;
        init_adc()?;
    }
    info!("hw_init: all peripherals configured");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): peripheral init skipped");
    Ok(())
}

// ── GPIO Outputs ──────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_relay_output() -> Result<(), HwInitError> {
    let cfg = gpio_config_t {
        pin_bit_mask: 1u64 << pins::RELAY_PIN,
        mode: gpio_mode_t_GPIO_MODE_OUTPUT,
        pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
        pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
        intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
    };
    let ret = unsafe { gpio_config(&cfg) };
    if ret != ESP_OK as i32 { return Err(HwInitError::GpioConfigFailed(ret)); }
    // Relay de-energised until the service applies the boot state.
    unsafe { gpio_set_level(pins::RELAY_PIN, 0) };

    info!("hw_init: relay output configured (GPIO{})", pins::RELAY_PIN);
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_write(pin: i32, high: bool) {
    // SAFETY: gpio_set_level writes to an already-configured output pin;
    // pin was validated during init_relay_output(). Main-loop only.
    unsafe { gpio_set_level(pin as gpio_num_t, if high { 1 } else { 0 }); }
}

#[cfg(not(target_os = "espidf"))]
thread_local! {
    static SIM_GPIO_WRITES: core::cell::RefCell<Vec<(i32, bool)>> =
        const { core::cell::RefCell::new(Vec::new()) };
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_write(pin: i32, high: bool) {
    SIM_GPIO_WRITES.with(|w| w.borrow_mut().push((pin, high)));
}

/// Drain the `(pin, high)` pairs written on the calling thread.
#[cfg(not(target_os = "espidf"))]
pub fn sim_take_gpio_writes() -> Vec<(i32, bool)> {
    SIM_GPIO_WRITES.with(|w| core::mem::take(&mut *w.borrow_mut()))
}

// ── ADC (oneshot) ─────────────────────────────────────────────

#[cfg(target_os = "espidf")]
static mut ADC1_HANDLE: adc_oneshot_unit_handle_t = core::ptr::null_mut();

/// SAFETY: Must be called only from the single-threaded init path or the
/// main-loop ADC read path.
#[cfg(target_os = "espidf")]
unsafe fn adc1_handle() -> adc_oneshot_unit_handle_t {
    unsafe { ADC1_HANDLE }
}

#[cfg(target_os = "espidf")]
unsafe fn init_adc() -> Result<(), HwInitError> {
    let init_cfg = adc_oneshot_unit_init_cfg_t {
        unit_id: adc_unit_t_ADC_UNIT_1,
        ulp_mode: adc_ulp_mode_t_ADC_ULP_MODE_DISABLE,
        ..Default::default()
    };
    // SAFETY: ADC1_HANDLE is only written here, once at boot.
    let ret = unsafe { adc_oneshot_new_unit(&init_cfg, &raw mut ADC1_HANDLE) };
    if ret != ESP_OK as i32 { return Err(HwInitError::AdcInitFailed(ret)); }

    let chan_cfg = adc_oneshot_chan_cfg_t {
        atten: adc_atten_t_ADC_ATTEN_DB_12,
        bitwidth: adc_bitwidth_t_ADC_BITWIDTH_12,
    };

    let ret = unsafe { adc_oneshot_config_channel(adc1_handle(), pins::SENSOR_PIN, &chan_cfg) };
    if ret != ESP_OK as i32 { return Err(HwInitError::AdcInitFailed(ret)); }

    info!("hw_init: ADC1 configured (CH{}=sensor)", pins::SENSOR_PIN);
    Ok(())
}

/// Read one ADC1 sample. `None` when the driver reports an error.
#[cfg(target_os = "espidf")]
pub fn adc1_read(channel: u32) -> Option<u16> {
    let mut raw: i32 = 0;
    // SAFETY: adc1_handle() contract — single-threaded main-loop access only.
    let ret = unsafe { adc_oneshot_read(adc1_handle(), channel, &mut raw) };
    if ret != ESP_OK as i32 {
        return None;
    }
    Some(raw.max(0) as u16)
}

#[cfg(not(target_os = "espidf"))]
thread_local! {
    static SIM_ADC: core::cell::Cell<Option<u16>> = const { core::cell::Cell::new(Some(0)) };
}

/// Inject the value returned by simulated ADC reads on the calling thread.
/// `None` makes reads fail.
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_adc(raw: Option<u16>) {
    SIM_ADC.with(|v| v.set(raw));
}

#[cfg(not(target_os = "espidf"))]
pub fn adc1_read(_channel: u32) -> Option<u16> {
    SIM_ADC.with(core::cell::Cell::get)
}

// ── UART (host link) ──────────────────────────────────────────

#[cfg(target_os = "espidf")]
const UART_RX_BUF: i32 = 1024;

#[cfg(target_os = "espidf")]
pub fn init_uart(baud: u32) -> Result<(), HwInitError> {
    let cfg = uart_config_t {
        baud_rate: baud as i32,
        data_bits: uart_word_length_t_UART_DATA_8_BITS,
        parity: uart_parity_t_UART_PARITY_DISABLE,
        stop_bits: uart_stop_bits_t_UART_STOP_BITS_1,
        flow_ctrl: uart_hw_flowcontrol_t_UART_HW_FLOWCTRL_DISABLE,
        ..Default::default()
    };
    // SAFETY: driver install and pin routing happen once from main()
    // before the port is read or written.
    unsafe {
        let ret = uart_driver_install(pins::UART_PORT, UART_RX_BUF, 0, 0, core::ptr::null_mut(), 0);
        if ret != ESP_OK { return Err(HwInitError::UartInitFailed(ret)); }
        let ret = uart_param_config(pins::UART_PORT, &cfg);
        if ret != ESP_OK { return Err(HwInitError::UartInitFailed(ret)); }
        let ret = uart_set_pin(
            pins::UART_PORT,
            pins::UART_TX_GPIO,
            pins::UART_RX_GPIO,
            UART_PIN_NO_CHANGE,
            UART_PIN_NO_CHANGE,
        );
        if ret != ESP_OK { return Err(HwInitError::UartInitFailed(ret)); }
    }
    info!("hw_init: UART{} at {} baud", pins::UART_PORT, baud);
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_uart(baud: u32) -> Result<(), HwInitError> {
    log::info!("hw_init(sim): UART init skipped ({} baud)", baud);
    Ok(())
}
