pub mod refprop;
