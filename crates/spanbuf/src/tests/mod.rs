mod property_ascii;
mod property_roundtrip;
mod strings;
