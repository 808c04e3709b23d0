use pindrop_rs::{PinCell, PinError, Region};

fn main() -> Result<(), PinError> {
    env_logger::init();

    let lon = 77.2090;
    let lat = 28.6139;

    for region in Region::ALL {
        let cell = PinCell::from_wgs84(&(lon, lat), region)?;

        println!("{}: {}", region.code_name(), cell.pin);
        println!("Center: ({}, {})", cell.latitude(), cell.longitude());
        println!(
            "Cell: lat [{}, {}], lon [{}, {}]",
            cell.bounds.min_lat, cell.bounds.max_lat, cell.bounds.min_lon, cell.bounds.max_lon
        );

        let decoded = PinCell::from_pin(&cell.pin.to_string(), region)?;
        log::debug!("{} decodes to {:?}", decoded.pin, decoded.coordinates());
    }

    Ok(())
}
