//! GRIB2 test data generator for unstructured grids.
//!
//! Creates minimal GRIB2 messages with an unstructured grid definition
//! (template 3.101, as used by ICON), an analysis/forecast product
//! (template 4.0) and simple packing (template 5.0). Several messages can
//! be concatenated into one file with [`Grib2Builder::build_file`].

/// Build a minimal GRIB2 message for an unstructured grid.
#[derive(Debug, Clone)]
pub struct Grib2Builder {
    discipline: u8,
    center: u16,
    year: u16,
    month: u8,
    day: u8,
    hour: u8,
    // Grid definition (template 3.101)
    number_of_grid_used: u32,
    number_of_grid_in_reference: u8,
    uuid: [u8; 16],
    // Product definition
    param_category: u8,
    param_number: u8,
    level_type: u8,
    level_value: u32,
    forecast_hour: u32,
    // Data
    data_values: Vec<f32>,
}

impl Grib2Builder {
    /// Create a builder for an ICON-like 2 m temperature message with `ncell` values.
    pub fn new_icon_t2m(ncell: usize) -> Self {
        Self {
            discipline: 0, // Meteorological
            center: 78,    // DWD Offenbach
            year: 2012,
            month: 2,
            day: 23,
            hour: 2,
            number_of_grid_used: 26,
            number_of_grid_in_reference: 1,
            uuid: [
                0xa2, 0x7b, 0x8d, 0xe6, 0x18, 0xc4, 0x11, 0xe4, 0x82, 0x0a, 0xb5, 0xb0, 0x98,
                0xc6, 0xa5, 0xc0,
            ],
            param_category: 0,
            param_number: 0, // Temperature
            level_type: 103, // m above ground
            level_value: 2,  // 2m
            forecast_hour: 0,
            data_values: vec![280.15; ncell],
        }
    }

    pub fn with_reference_time(mut self, year: u16, month: u8, day: u8, hour: u8) -> Self {
        self.year = year;
        self.month = month;
        self.day = day;
        self.hour = hour;
        self
    }

    pub fn with_discipline(mut self, discipline: u8) -> Self {
        self.discipline = discipline;
        self
    }

    pub fn with_parameter(mut self, category: u8, number: u8) -> Self {
        self.param_category = category;
        self.param_number = number;
        self
    }

    pub fn with_level(mut self, level_type: u8, level_value: u32) -> Self {
        self.level_type = level_type;
        self.level_value = level_value;
        self
    }

    pub fn with_forecast_hour(mut self, hour: u32) -> Self {
        self.forecast_hour = hour;
        self
    }

    pub fn with_constant_value(mut self, value: f32) -> Self {
        let n = self.data_values.len();
        self.data_values = vec![value; n];
        self
    }

    pub fn with_data(mut self, data: Vec<f32>) -> Self {
        self.data_values = data;
        self
    }

    pub fn num_points(&self) -> usize {
        self.data_values.len()
    }

    /// Concatenate several messages into one GRIB2 file.
    pub fn build_file(builders: &[Grib2Builder]) -> Vec<u8> {
        builders.iter().flat_map(|b| b.build()).collect()
    }

    /// Build the complete GRIB2 message bytes
    pub fn build(&self) -> Vec<u8> {
        let mut message = Vec::new();

        let section1 = self.build_section1();
        let section3 = self.build_section3();
        let section4 = self.build_section4();
        let section5 = self.build_section5();
        let section6 = self.build_section6();
        let section7 = self.build_section7();

        let message_length = 16 // Section 0
            + section1.len()
            + section3.len()
            + section4.len()
            + section5.len()
            + section6.len()
            + section7.len()
            + 4; // Section 8 (end)

        // Section 0: Indicator
        message.extend_from_slice(b"GRIB");
        message.extend_from_slice(&[0, 0]); // Reserved
        message.push(self.discipline);
        message.push(2); // Edition 2
        message.extend_from_slice(&(message_length as u64).to_be_bytes());

        message.extend_from_slice(&section1);
        message.extend_from_slice(&section3);
        message.extend_from_slice(&section4);
        message.extend_from_slice(&section5);
        message.extend_from_slice(&section6);
        message.extend_from_slice(&section7);

        // Section 8: End
        message.extend_from_slice(b"7777");

        message
    }

    fn build_section1(&self) -> Vec<u8> {
        let mut section = Vec::new();
        let section_length: u32 = 21;

        section.extend_from_slice(&section_length.to_be_bytes());
        section.push(1);

        section.extend_from_slice(&self.center.to_be_bytes());
        section.extend_from_slice(&255u16.to_be_bytes()); // Sub-center
        section.push(11); // Master table version
        section.push(1); // Local table version
        section.push(1); // Significance of reference time (start of forecast)

        section.extend_from_slice(&self.year.to_be_bytes());
        section.push(self.month);
        section.push(self.day);
        section.push(self.hour);
        section.push(0); // Minute
        section.push(0); // Second

        section.push(0); // Production status (operational)
        section.push(1); // Type of data (forecast)

        section
    }

    fn build_section3(&self) -> Vec<u8> {
        let mut section = Vec::new();

        // Template 3.101: General unstructured grid
        let section_length: u32 = 35;

        section.extend_from_slice(&section_length.to_be_bytes());
        section.push(3);

        section.push(0); // Source of grid definition
        section.extend_from_slice(&(self.data_values.len() as u32).to_be_bytes());
        section.push(0); // Number of octets for optional list
        section.push(0); // Interpretation of optional list
        section.extend_from_slice(&101u16.to_be_bytes());

        section.push(6); // Shape of Earth (spherical, radius 6371229m)
        section.extend_from_slice(&self.number_of_grid_used.to_be_bytes()[1..]); // 3 octets
        section.push(self.number_of_grid_in_reference);
        section.extend_from_slice(&self.uuid);

        section
    }

    fn build_section4(&self) -> Vec<u8> {
        let mut section = Vec::new();

        // Template 4.0: Analysis or forecast at horizontal level
        let section_length: u32 = 34;

        section.extend_from_slice(&section_length.to_be_bytes());
        section.push(4);

        section.extend_from_slice(&0u16.to_be_bytes()); // Number of coordinate values
        section.extend_from_slice(&0u16.to_be_bytes()); // Product definition template (0)

        section.push(self.param_category);
        section.push(self.param_number);
        section.push(2); // Type of generating process (forecast)
        section.push(0); // Background generating process
        section.push(0); // Analysis or forecast process
        section.extend_from_slice(&0u16.to_be_bytes()); // Hours of cutoff
        section.push(0); // Minutes of cutoff
        section.push(1); // Time range unit (hours)
        section.extend_from_slice(&self.forecast_hour.to_be_bytes());

        section.push(self.level_type);
        section.push(0); // Scale factor
        section.extend_from_slice(&self.level_value.to_be_bytes());

        section.push(255); // Type of second fixed surface (none)
        section.push(0);
        section.extend_from_slice(&0u32.to_be_bytes());

        section
    }

    fn build_section5(&self) -> Vec<u8> {
        let mut section = Vec::new();

        // Template 5.0: Simple packing
        let (reference_value, binary_scale_factor, bits_per_value) = self.packing_parameters();

        let section_length: u32 = 21;

        section.extend_from_slice(&section_length.to_be_bytes());
        section.push(5);

        section.extend_from_slice(&(self.data_values.len() as u32).to_be_bytes());
        section.extend_from_slice(&0u16.to_be_bytes()); // Template 5.0

        section.extend_from_slice(&reference_value.to_be_bytes());
        section.extend_from_slice(&sign_magnitude_i16(binary_scale_factor));
        section.extend_from_slice(&sign_magnitude_i16(0)); // Decimal scale factor
        section.push(bits_per_value);
        section.push(0); // Original field type (floating point)

        section
    }

    fn build_section6(&self) -> Vec<u8> {
        let mut section = Vec::new();
        let section_length: u32 = 6;

        section.extend_from_slice(&section_length.to_be_bytes());
        section.push(6);
        section.push(255); // No bitmap, all data present

        section
    }

    fn build_section7(&self) -> Vec<u8> {
        let mut section = Vec::new();

        let packed_data = self.pack_simple();
        let section_length: u32 = 5 + packed_data.len() as u32;

        section.extend_from_slice(&section_length.to_be_bytes());
        section.push(7);
        section.extend_from_slice(&packed_data);

        section
    }

    /// Reference value, binary scale factor and bit width for 16-bit packing.
    ///
    /// Unpacking formula: value = reference_value + packed_value * 2^E
    fn packing_parameters(&self) -> (f32, i16, u8) {
        let (min_val, max_val) = self.data_values.iter().fold(
            (f32::INFINITY, f32::NEG_INFINITY),
            |(min, max), &v| (min.min(v), max.max(v)),
        );

        if self.data_values.is_empty() || max_val == min_val {
            let reference = if min_val.is_finite() { min_val } else { 0.0 };
            return (reference, 0, 0);
        }

        let range = max_val - min_val;
        let binary_scale_factor = (range / 65535.0).log2().ceil() as i16;
        (min_val, binary_scale_factor, 16)
    }

    fn pack_simple(&self) -> Vec<u8> {
        let (reference_value, binary_scale_factor, bits_per_value) = self.packing_parameters();

        if bits_per_value == 0 {
            return Vec::new();
        }

        let binary_scale = 2.0_f64.powi(binary_scale_factor as i32);
        let mut packed = Vec::with_capacity(self.data_values.len() * 2);

        for &val in &self.data_values {
            let packed_value = ((val as f64 - reference_value as f64) / binary_scale)
                .round()
                .clamp(0.0, 65535.0) as u16;
            packed.extend_from_slice(&packed_value.to_be_bytes());
        }

        packed
    }
}

/// GRIB2 signed integers use sign-and-magnitude, not two's complement.
fn sign_magnitude_i16(value: i16) -> [u8; 2] {
    let magnitude = value.unsigned_abs() & 0x7FFF;
    let raw = if value < 0 { magnitude | 0x8000 } else { magnitude };
    raw.to_be_bytes()
}
