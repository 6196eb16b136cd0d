#[macro_export]
macro_rules! info_parse {
    ($name:expr, $token:expr) => {
        log::debug!(
            "Parsing {} at {}: {:?}",
            $name,
            $token.position,
            $token.text
        );
    };
}

#[macro_export]
macro_rules! test_parse {
    ($($name:ident: $file:expr,)*) => {
    $(
        #[test]
        fn $name(){
            let _ = env_logger::try_init();
            let src = include_str!($file);
            log::info!("Reading file: {:?}", $file);
            let ast = parse(src);
            assert!(ast.is_ok(), "{:?}", ast.err());
            let ast = ast.unwrap();
            for decl in ast {
                log::info!("{}: {} = {}", decl.label, decl.signature, decl.body);
            }
        }
    )*
    }
}
